/// Words used by the time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLabels {
    pub due: &'static str,
    pub minutes: &'static str,
}

const ENGLISH: TimeLabels = TimeLabels {
    due: "Due",
    minutes: "min",
};

impl TimeLabels {
    /// Picks labels from the primary subtag of a BCP 47 tag; unknown tags fall back to English.
    pub fn for_locale(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "de" => TimeLabels {
                due: "Jetzt",
                minutes: "Min.",
            },
            "fr" => TimeLabels {
                due: "Imminent",
                minutes: "min",
            },
            "es" => TimeLabels {
                due: "Llegando",
                minutes: "min",
            },
            "nl" => TimeLabels {
                due: "Nu",
                minutes: "min",
            },
            _ => ENGLISH,
        }
    }
}

impl Default for TimeLabels {
    fn default() -> Self {
        ENGLISH
    }
}

#[cfg(test)]
mod tests {
    use super::TimeLabels;

    #[test]
    fn region_suffix_is_ignored() {
        assert_eq!(TimeLabels::for_locale("en-GB"), TimeLabels::default());
        assert_eq!(TimeLabels::for_locale("de_AT").due, "Jetzt");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(TimeLabels::for_locale("xx").due, "Due");
        assert_eq!(TimeLabels::for_locale("").minutes, "min");
    }
}
