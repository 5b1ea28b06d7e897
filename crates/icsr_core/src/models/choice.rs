use thiserror::Error;

/// Raised when a raw string is not one of the allowed labels of a choice list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not one of: {}", allowed.join(", "))]
pub struct InvalidChoice {
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Declares a closed selection list.
///
/// Every variant gets a display label which is also its serde name, so the
/// same string is used by the catalog, the exported document and JSON forms.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
            pub const LABELS: &'static [&'static str] = &[ $( $label ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::choice::InvalidChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $crate::models::choice::InvalidChoice {
                        value: s.to_string(),
                        allowed: $name::LABELS,
                    })
            }
        }
    };
}

pub(crate) use choice_enum;
