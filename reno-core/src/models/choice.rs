//! Shared behaviour for the closed questionnaire enumerations.
//!
//! Every answer the wizard collects is drawn from a small fixed set. Each set
//! is declared through [`choice_enum!`], which derives the machine key used by
//! pricing files and the terminal front end, the human label shown in the
//! breakdown, and case-insensitive parsing.

use thiserror::Error;

/// A string did not match any key of a choice enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownChoice {
    /// Human name of the enumeration (e.g. `property type`).
    pub kind: &'static str,
    /// The rejected input, as given.
    pub value: String,
}

/// A closed set of answers to one wizard question.
pub trait Choice: Copy + Eq + Ord + std::fmt::Debug + 'static {
    /// Human name of the enumeration, used in error messages.
    const KIND: &'static str;

    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Stable machine key.
    fn as_str(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Extra keys accepted by [`Choice::parse`].
    fn aliases(&self) -> &'static [&'static str];

    /// Position of this value within [`Choice::ALL`].
    fn index(&self) -> usize;

    /// Parses a key or alias, ignoring case and surrounding whitespace.
    fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL.iter().copied().find(|choice| {
            choice.as_str().eq_ignore_ascii_case(wanted)
                || choice
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(wanted))
        })
    }
}

/// Declares a fieldless enum implementing [`Choice`], `Display` (the label)
/// and `FromStr` (the key).
///
/// ```ignore
/// choice_enum! {
///     pub enum Finish as "finish" {
///         Matte => ("matte", "Matte Finish"),
///         Gloss => ("gloss", "High Gloss", "shiny"),
///     }
/// }
/// ```
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:tt {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($key:tt, $label:tt $(, $alias:tt)*)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $key $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $crate::models::Choice for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn aliases(&self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => &[$($alias),*],)+
                }
            }

            fn index(&self) -> usize {
                *self as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut std::fmt::Formatter<'_>,
            ) -> std::fmt::Result {
                f.write_str($crate::models::Choice::label(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::models::Choice>::parse(s).ok_or_else(|| {
                    $crate::models::UnknownChoice {
                        kind: $kind,
                        value: s.to_string(),
                    }
                })
            }
        }
    };
}

pub(crate) use choice_enum;
