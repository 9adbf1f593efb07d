use super::choice::choice_enum;

choice_enum! {
    /// The kind of home being renovated.
    pub enum PropertyType as "property type" {
        Condo => ("condo", "Condominium"),
        Apartment => ("apartment", "Apartment"),
        Terrace => ("terrace", "Terrace House"),
        SemiDetached => ("semi-detached", "Semi-Detached", "semi-d"),
        Bungalow => ("bungalow", "Bungalow"),
    }
}

choice_enum! {
    /// Built-up area bracket of the property.
    pub enum PropertySize as "property size" {
        Small => ("small", "Below 800 sqft"),
        Medium => ("medium", "800 - 1,200 sqft"),
        Large => ("large", "1,200 - 1,800 sqft"),
        XLarge => ("xlarge", "1,800 - 2,500 sqft"),
        XXLarge => ("xxlarge", "Above 2,500 sqft"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Choice, UnknownChoice};

    #[test]
    fn parse_accepts_keys_case_insensitively() {
        assert_eq!(PropertyType::parse("condo"), Some(PropertyType::Condo));
        assert_eq!(PropertyType::parse("  BUNGALOW "), Some(PropertyType::Bungalow));
        assert_eq!(PropertySize::parse("XLarge"), Some(PropertySize::XLarge));
    }

    #[test]
    fn parse_accepts_short_semi_detached_alias() {
        assert_eq!(PropertyType::parse("semi-d"), Some(PropertyType::SemiDetached));
        assert_eq!(
            PropertyType::parse("semi-detached"),
            Some(PropertyType::SemiDetached)
        );
    }

    #[test]
    fn from_str_reports_kind_and_value() {
        let err = "castle".parse::<PropertyType>().unwrap_err();

        assert_eq!(
            err,
            UnknownChoice {
                kind: "property type",
                value: "castle".to_string(),
            }
        );
        assert_eq!(err.to_string(), "unknown property type 'castle'");
    }

    #[test]
    fn index_follows_declaration_order() {
        for (position, size) in PropertySize::ALL.iter().enumerate() {
            assert_eq!(size.index(), position);
        }
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(PropertyType::Terrace.to_string(), "Terrace House");
        assert_eq!(PropertySize::Medium.to_string(), "800 - 1,200 sqft");
    }
}
