pub mod choice;
pub mod case_record;
pub mod enums;

pub use case_record::{
    AdverseEvent, CaseRecord, Causality, GeneralInfo, Narrative, ParentCase, Patient, Reporter,
    SuspectedDrug,
};
pub use choice::InvalidChoice;
pub use enums::*;
