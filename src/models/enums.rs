//! Closed domain enums stored and exchanged as text

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

use crate::error::AppError;

/// Declares a closed enum with a fixed text form used both on the wire and in
/// the database. Unknown text is rejected with `AppError::BadRequest`.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:tt),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(AppError::BadRequest(format!(
                        "Invalid {} value: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                Ok(s.parse::<$name>()?)
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Kind of maintenance work
    RequestType {
        Corrective => "Corrective",
        Preventive => "Preventive",
    }
}

text_enum! {
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

text_enum! {
    /// Lifecycle stage of a maintenance request. Any stage may move to any
    /// other; Repaired and Scrap count as closed.
    Stage {
        New => "New",
        InProgress => "In Progress",
        Repaired => "Repaired",
        Scrap => "Scrap",
    }
}

impl Stage {
    /// Repaired and Scrap are excluded from overdue and open counts
    pub fn is_closed(&self) -> bool {
        matches!(self, Stage::Repaired | Stage::Scrap)
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }
}

text_enum! {
    /// Recurrence of preventive work
    Frequency {
        Daily => "Daily",
        Weekly => "Weekly",
        Monthly => "Monthly",
        Quarterly => "Quarterly",
        Yearly => "Yearly",
    }
}

text_enum! {
    /// Grouping dimension of the requests report
    ReportGroupBy {
        Team => "team",
        Category => "category",
    }
}

text_enum! {
    /// Dashboard task list filter
    TaskStatusFilter {
        Overdue => "overdue",
        Upcoming => "upcoming",
        Completed => "completed",
    }
}

/// Parse an optional query-string value into a closed enum
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = AppError>,
{
    match value {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_text_form() {
        assert_eq!(Stage::InProgress.as_str(), "In Progress");
        assert_eq!("In Progress".parse::<Stage>().unwrap(), Stage::InProgress);
        assert_eq!(
            serde_json::to_string(&Stage::InProgress).unwrap(),
            "\"In Progress\""
        );
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), *stage);
        }
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(matches!("Done".parse::<Stage>(), Err(AppError::BadRequest(_))));
        assert!("in progress".parse::<Stage>().is_err());
        assert!(serde_json::from_str::<Stage>("\"Broken\"").is_err());
        assert!(serde_json::from_str::<RequestType>("\"Emergency\"").is_err());
        assert!("department".parse::<ReportGroupBy>().is_err());
    }

    #[test]
    fn test_closed_stages() {
        assert!(Stage::Repaired.is_closed());
        assert!(Stage::Scrap.is_closed());
        assert!(Stage::New.is_open());
        assert!(Stage::InProgress.is_open());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional::<TaskStatusFilter>(None).unwrap(), None);
        assert_eq!(parse_optional::<TaskStatusFilter>(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional::<TaskStatusFilter>(Some("upcoming")).unwrap(),
            Some(TaskStatusFilter::Upcoming)
        );
        assert!(parse_optional::<RequestType>(Some("Other")).is_err());
    }
}
