use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use meps_unify::config::PipelineConfig;
use meps_unify::models::Snapshot;
use tempfile::TempDir;

pub const DEMOGRAPHICS_CSV: &str = "\
person_unique_id,age_last_birthday,sex,race_ethnicity,marital_status_2022,region_2022,total_healthcare_exp_2022,total_out_of_pocket_exp_2022,poverty_category_2022,insurance_coverage_2022,perceived_health_status,person_weight_2022
10001,54,Female,Non-Hispanic White,Married,South,8120,950,High income,Any private,Good,10234.5
10002,31,Male,Hispanic,Never married,West,300,40,Middle income,Any private,Excellent,8800.25
10003,67,Male,Non-Hispanic Black,Widowed,Midwest,15000,2100,Low income,Any private,Fair,6120
10004,45,Female,Non-Hispanic Asian,Married,Northeast,0,0,High income,Uninsured,Very good,7000
";

pub const INSURANCE_CSV: &str = "\
person_unique_id,round_number,insurance_coverage,out_of_pocket_premium,out_of_pocket_premium_edited
10001,1,Any private,1200,1200
10001,2,Any private,1200,1250.5
10001,3,Any private,1300,1300
10002,1,Any private,0,0.0
10003,1,Any private,Inapplicable,Inapplicable
10003,2,Any private,150,150
10003,3,Any private,-1,-1
99999,1,Any private,500,500
";

pub const CONDITIONS_CSV: &str = "\
person_unique_id,condition_round,age_at_diagnosis,injury_flag,icd10_code,ccsr_category_1
10001,2,53,No,I10,CIR007
10001,1,53,Yes,S52,INJ003
10002,1,30,No,J45,RSP009
10003,1,66,Yes,S52,INJ003
10003,2,66,No,E11,END002
10003,3,67,No,I10,CIR007
10003,,66,No,J45,RSP009
";

pub const JOBS_CSV: &str = "\
person_unique_id,round_number,insurance_offered,temporary_job,salaried_employee,hourly_wage,hours_per_week
10001,1,Yes,No,Yes,32.5,40
10001,3,Yes,Refused,Yes,33,40
10001,4,Yes,No,Yes,34,40
10002,1,Don't know,No,Inapplicable,,20
10003,2,No,No,No,18.75,Not ascertained
10003,3,No,No,No,19,30
10003,Inapplicable,No,No,No,19,30
";

pub const CCSR_REFERENCE_CSV: &str = "\
ICD-10-CM Code,ICD-10-CM Code Description,CCSR Category,CCSR Category Description
I10,Essential (primary) hypertension,CIR007,Essential hypertension
S52501A,Unspecified fracture of right radius,INJ003,Fracture
E119,Type 2 diabetes mellitus without complications,END002,Diabetes mellitus without complication
J45909,Unspecified asthma,RSP009,Asthma
";

pub const CHRONIC_REFERENCE_CSV: &str = "\
'ICD-10-CM CODE','ICD-10-CM CODE DESCRIPTION','CHRONIC INDICATOR'
'I10','Essential (primary) hypertension','1'
'S52501A','Unspecified fracture of right radius','0'
'E119','Type 2 diabetes mellitus without complications','1'
'J45909','Unspecified asthma','1'
";

/// A data directory laid out the way the pipeline expects
pub struct Fixture {
    pub dir: TempDir,
    pub config: PipelineConfig,
}

impl Fixture {
    /// Write every fixture file and build a quiet configuration over them
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = PipelineConfig::with_data_dir(dir.path())
            .with_outputs(
                dir.path().join("out").join("unified.json"),
                dir.path().join("out").join("snapshots.json"),
            )
            .with_threads(2)
            .without_progress();

        let fixture = Self { dir, config };
        fixture.write(&fixture.config.demographics_path, DEMOGRAPHICS_CSV);
        fixture.write(&fixture.config.insurance_path, INSURANCE_CSV);
        fixture.write(&fixture.config.conditions_path, CONDITIONS_CSV);
        fixture.write(&fixture.config.jobs_path, JOBS_CSV);
        fixture.write(&fixture.config.ccsr_reference_path, CCSR_REFERENCE_CSV);
        fixture.write(&fixture.config.chronic_reference_path, CHRONIC_REFERENCE_CSV);
        fixture
    }

    /// Replace a file's contents
    pub fn write(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    /// A path inside the fixture directory
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Snapshots grouped by person, rounds ascending
#[must_use]
pub fn by_person(snapshots: &[Snapshot]) -> BTreeMap<&str, Vec<&Snapshot>> {
    let mut grouped: BTreeMap<&str, Vec<&Snapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        grouped
            .entry(snapshot.person_unique_id.as_str())
            .or_default()
            .push(snapshot);
    }
    grouped
}

/// Condition descriptions of a snapshot
#[must_use]
pub fn descriptions(snapshot: &Snapshot) -> Vec<&str> {
    snapshot
        .condition_descriptions()
        .into_iter()
        .map(|d| d.unwrap_or("<none>"))
        .collect()
}
