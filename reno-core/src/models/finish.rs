use super::choice::choice_enum;

choice_enum! {
    /// How much of the space is being redone.
    pub enum RenovationType as "renovation type" {
        Furniture => ("furniture", "Furniture Only"),
        Partial => ("partial", "Partial Makeover"),
        Full => ("full", "Full Makeover"),
    }
}

choice_enum! {
    /// Design style of the finished interior.
    pub enum Style as "style" {
        Modern => ("modern", "Modern"),
        Minimalist => ("minimalist", "Minimalist"),
        Contemporary => ("contemporary", "Contemporary"),
        Classic => ("classic", "Classic"),
        Scandinavian => ("scandinavian", "Scandinavian"),
    }
}
