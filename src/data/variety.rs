use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Variety – a soybean cultivar column
// ---------------------------------------------------------------------------

/// Column-name prefix shared by the JS breeding line (`JS-335`, `JS 95-60`, ...).
pub const JS_PREFIX: &str = "JS";

/// A soybean cultivar recognised as a severity column in the dataset.
///
/// Named cultivars are matched exactly; the JS line is matched by prefix and
/// keeps its full column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum Variety {
    Js(String),
    Shivalik,
    Punjab1,
    Pk472,
    Bragg,
    Monetta,
    Nrc7,
    Pk262,
    Gaurav,
}

impl Variety {
    /// Every named (non-JS) cultivar, in display order.
    pub const NAMED: [Variety; 8] = [
        Variety::Shivalik,
        Variety::Punjab1,
        Variety::Pk472,
        Variety::Bragg,
        Variety::Monetta,
        Variety::Nrc7,
        Variety::Pk262,
        Variety::Gaurav,
    ];

    /// Classify a dataset column name. `None` for weather and unrelated columns.
    pub fn from_column(name: &str) -> Option<Self> {
        if name.starts_with(JS_PREFIX) {
            return Some(Variety::Js(name.to_string()));
        }
        Self::NAMED.into_iter().find(|v| v.column_name() == name)
    }

    /// The exact dataset column name for this cultivar.
    pub fn column_name(&self) -> &str {
        match self {
            Variety::Js(name) => name,
            Variety::Shivalik => "Shivalik",
            Variety::Punjab1 => "Punjab1",
            // The source sheet has the space; keep it.
            Variety::Pk472 => "PK -472",
            Variety::Bragg => "Bragg",
            Variety::Monetta => "Monetta",
            Variety::Nrc7 => "NRC-7",
            Variety::Pk262 => "PK-262",
            Variety::Gaurav => "Gaurav",
        }
    }
}

impl fmt::Display for Variety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl From<Variety> for String {
    fn from(v: Variety) -> Self {
        v.column_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_prefix_keeps_full_name() {
        let v = Variety::from_column("JS 95-60").unwrap();
        assert_eq!(v, Variety::Js("JS 95-60".into()));
        assert_eq!(v.to_string(), "JS 95-60");
    }

    #[test]
    fn named_cultivars_match_exactly() {
        for v in Variety::NAMED {
            assert_eq!(Variety::from_column(v.column_name()), Some(v.clone()));
        }
        assert_eq!(Variety::from_column("PK-472"), None);
        assert_eq!(Variety::from_column("shivalik"), None);
    }

    #[test]
    fn weather_columns_are_not_varieties() {
        for col in ["Year", "SMW", "Max_Temp", "Rainfall", "Mean_RH", "js-1"] {
            assert_eq!(Variety::from_column(col), None, "{col}");
        }
    }
}
