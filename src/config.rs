use crate::error::{
    BadEnvVarSnafu, ParseNumberSnafu, RegistryResult, UnknownStoreBackendSnafu,
};
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    store: StoreBackend,
}

#[derive(Clone, Debug)]
pub enum StoreBackend {
    Postgres(Arc<DbConfig>),
    Memory,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistryResult<Self> {
        Self::from_vars(dotenvy::var)
    }

    /// `lookup` mirrors `dotenvy::var`, so tests can feed a fixed environment.
    pub fn from_vars(
        lookup: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> RegistryResult<Self> {
        let server_ip = lookup("REGISTRY_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        let store = match lookup("REGISTRY_STORE").ok().as_deref().map(str::trim) {
            None | Some("" | "postgres") => StoreBackend::Postgres(Arc::new(DbConfig::from_vars(&lookup)?)),
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return UnknownStoreBackendSnafu {
                    found: other.to_string(),
                }
                .fail();
            }
        };

        Ok(Self { server_ip, store })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn store(&self) -> &StoreBackend {
        &self.store
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    fn from_vars(
        lookup: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> RegistryResult<Self> {
        let get_env_var = |name| lookup(name).context(BadEnvVarSnafu { name });
        let parse_env_var = |name| {
            get_env_var(name)?
                .trim()
                .parse()
                .context(ParseNumberSnafu { name })
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Ok(_) => parse_env_var("DB_MAX_CONNECTIONS")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?
                .trim()
                .parse()
                .context(ParseNumberSnafu { name: "DB_PORT" })?,
            database: get_env_var("DB_NAME")?,
            max_connections,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}
