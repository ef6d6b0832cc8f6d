use crate::{
    data::student::StudentForm, error::RegistryResult, registry, store::StudentStore,
};

pub struct SampleStudent {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub roll_number: &'static str,
    pub phone: &'static str,
    pub date_of_birth: &'static str,
    pub address: &'static str,
}

impl SampleStudent {
    fn to_form(&self) -> StudentForm {
        StudentForm {
            first_name: self.first_name.into(),
            last_name: self.last_name.into(),
            email: self.email.into(),
            roll_number: self.roll_number.into(),
            phone: self.phone.into(),
            date_of_birth: self.date_of_birth.into(),
            address: self.address.into(),
            course: String::new(),
        }
    }
}

pub const SAMPLE_STUDENTS: [SampleStudent; 8] = [
    SampleStudent {
        first_name: "Rajesh",
        last_name: "Kumar",
        email: "rajesh.kumar@example.com",
        roll_number: "CSE001",
        phone: "9876543210",
        date_of_birth: "2004-05-15",
        address: "123 Main Street, Delhi, India",
    },
    SampleStudent {
        first_name: "Priya",
        last_name: "Singh",
        email: "priya.singh@example.com",
        roll_number: "CSE002",
        phone: "9876543211",
        date_of_birth: "2004-08-22",
        address: "456 Park Avenue, Mumbai, India",
    },
    SampleStudent {
        first_name: "Arjun",
        last_name: "Patel",
        email: "arjun.patel@example.com",
        roll_number: "CSE003",
        phone: "9876543212",
        date_of_birth: "2005-01-10",
        address: "789 Oak Road, Bangalore, India",
    },
    SampleStudent {
        first_name: "Neha",
        last_name: "Sharma",
        email: "neha.sharma@example.com",
        roll_number: "CSE004",
        phone: "9876543213",
        date_of_birth: "2004-11-30",
        address: "321 Elm Street, Chennai, India",
    },
    SampleStudent {
        first_name: "Vikram",
        last_name: "Reddy",
        email: "vikram.reddy@example.com",
        roll_number: "CSE005",
        phone: "9876543214",
        date_of_birth: "2005-03-18",
        address: "654 Maple Drive, Hyderabad, India",
    },
    SampleStudent {
        first_name: "Anjali",
        last_name: "Verma",
        email: "anjali.verma@example.com",
        roll_number: "CSE006",
        phone: "9876543215",
        date_of_birth: "2004-07-25",
        address: "987 Birch Lane, Pune, India",
    },
    SampleStudent {
        first_name: "Karan",
        last_name: "Nair",
        email: "karan.nair@example.com",
        roll_number: "CSE007",
        phone: "9876543216",
        date_of_birth: "2005-02-14",
        address: "147 Cedar Street, Kolkata, India",
    },
    SampleStudent {
        first_name: "Divya",
        last_name: "Gupta",
        email: "divya.gupta@example.com",
        roll_number: "CSE008",
        phone: "9876543217",
        date_of_birth: "2004-09-05",
        address: "258 Spruce Avenue, Ahmedabad, India",
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_in_store: i64,
}

/// Adds each sample student whose email is not yet registered. A sample that
/// fails to save is logged and counted but does not stop the rest.
pub async fn seed(store: &dyn StudentStore, samples: &[SampleStudent]) -> RegistryResult<SeedReport> {
    let mut report = SeedReport::default();

    for sample in samples {
        if store.get_by_email(sample.email).await?.is_some() {
            info!(
                email = sample.email,
                "Skipped {} {} (already exists)", sample.first_name, sample.last_name
            );
            report.skipped += 1;
            continue;
        }

        match registry::create(store, &sample.to_form()).await {
            Ok(student) => {
                info!("Created {}", student.full_name());
                report.created += 1;
            }
            Err(e) => {
                warn!(?e, "Error creating {}", sample.first_name);
                report.failed += 1;
            }
        }
    }

    report.total_in_store = store.count().await?;
    info!(
        created = report.created,
        skipped = report.skipped,
        failed = report.failed,
        total = report.total_in_store,
        "Seeding finished"
    );
    Ok(report)
}
