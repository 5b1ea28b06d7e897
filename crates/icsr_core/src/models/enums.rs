use super::choice::choice_enum;

choice_enum! {
    /// How the case reached the safety department.
    pub enum ReportType {
        Spontaneous => "Spontaneous",
        ClinicalTrial => "Clinical Trial",
        Literature => "Literature",
        Other => "Other",
    }
}

choice_enum! {
    pub enum Seriousness {
        NonSerious => "Non-Serious",
        Serious => "Serious",
    }
}

choice_enum! {
    /// Why a serious case is serious.
    ///
    /// `NonSerious` is the sentinel held by every non-serious case; it is never
    /// a valid pick for a serious one.
    pub enum SeriousnessCriteria {
        NonSerious => "Non-Serious",
        Death => "Death",
        LifeThreatening => "Life-Threatening",
        Hospitalization => "Hospitalization",
        Disability => "Disability",
        CongenitalAnomaly => "Congenital Anomaly",
        OtherMedicallyImportant => "Other Medically Important",
    }
}

choice_enum! {
    pub enum Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
        Unknown => "Unknown",
    }
}

choice_enum! {
    pub enum ParentCaseStatus {
        Open => "Open",
        Closed => "Closed",
        Ongoing => "Ongoing",
    }
}

choice_enum! {
    pub enum Outcome {
        Recovered => "Recovered",
        Recovering => "Recovering",
        NotRecovered => "Not Recovered",
        Fatal => "Fatal",
        Unknown => "Unknown",
    }
}

choice_enum! {
    pub enum Route {
        Oral => "Oral",
        Intravenous => "Intravenous",
        Intramuscular => "Intramuscular",
        Subcutaneous => "Subcutaneous",
        Topical => "Topical",
        Inhalation => "Inhalation",
        Other => "Other",
    }
}

choice_enum! {
    pub enum CausalityMethod {
        WhoUmc => "WHO-UMC",
        Naranjo => "Naranjo",
        Other => "Other",
    }
}

choice_enum! {
    pub enum CausalityResult {
        Certain => "Certain",
        Probable => "Probable",
        Possible => "Possible",
        Unlikely => "Unlikely",
        Conditional => "Conditional",
        Unassessable => "Unassessable",
    }
}

impl Default for ReportType {
    fn default() -> Self {
        ReportType::Spontaneous
    }
}

impl Default for Seriousness {
    fn default() -> Self {
        Seriousness::NonSerious
    }
}
