use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(StoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentStatus {
    Pending => "pending",
    Verified => "verified",
    Rejected => "rejected",
});

str_enum!(DocumentOrigin {
    Manual => "manual",
    Digilocker => "digilocker",
});

str_enum!(DocumentType {
    Resume => "resume",
    DegreeCertificate => "degree_certificate",
    ExperienceCertificate => "experience_certificate",
    SkillCertificate => "skill_certificate",
    IdentityProof => "identity_proof",
    AddressProof => "address_proof",
    EmploymentRecords => "employment_records",
    AcademicTranscripts => "academic_transcripts",
    ProfessionalReferences => "professional_references",
    Portfolio => "portfolio",
    Other => "other",
});

str_enum!(RequestStatus {
    Open => "open",
    Fulfilled => "fulfilled",
});

str_enum!(Role {
    Hr => "hr",
    User => "user",
});

str_enum!(DecisionOrigin {
    AutoVerification => "auto_verification",
    HrReview => "hr_review",
    TrustedImport => "trusted_import",
});

impl DocumentType {
    /// The full request catalog, in the order HR sees it.
    pub fn catalog() -> &'static [DocumentType] {
        &[
            Self::Resume,
            Self::DegreeCertificate,
            Self::ExperienceCertificate,
            Self::SkillCertificate,
            Self::IdentityProof,
            Self::AddressProof,
            Self::EmploymentRecords,
            Self::AcademicTranscripts,
            Self::ProfessionalReferences,
            Self::Portfolio,
            Self::Other,
        ]
    }

    /// Human-readable label for badges and request forms.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Resume/CV",
            Self::DegreeCertificate => "Degree Certificate",
            Self::ExperienceCertificate => "Experience Certificate",
            Self::SkillCertificate => "Skill Certification",
            Self::IdentityProof => "Identity Proof",
            Self::AddressProof => "Address Proof",
            Self::EmploymentRecords => "Previous Employment Records",
            Self::AcademicTranscripts => "Academic Transcripts",
            Self::ProfessionalReferences => "Professional References",
            Self::Portfolio => "Portfolio/Work Samples",
            Self::Other => "Other",
        }
    }
}
