//! The closed set of placeable component kinds and their per-kind defaults.

use std::fmt;

/// Kinds of component that can be placed on the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    Inductor,
    Capacitor,
    Source,
    Ground,
}

/// How a component's label is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Prefix followed by an ordinal, e.g. `R1`, `C3`.
    Numbered(char),
    /// A fixed label shared by every instance.
    Fixed(&'static str),
}

/// Defaults applied when a component of a given kind is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    /// Value assigned at placement (ohms, henries, farads or volts)
    pub default_value: f64,
    /// Display unit
    pub unit: &'static str,
    /// Label generation rule
    pub label: LabelStyle,
}

const RESISTOR: KindSpec = KindSpec {
    default_value: 220.0,
    unit: "Ω",
    label: LabelStyle::Numbered('R'),
};

const INDUCTOR: KindSpec = KindSpec {
    default_value: 0.1,
    unit: "H",
    label: LabelStyle::Numbered('L'),
};

const CAPACITOR: KindSpec = KindSpec {
    default_value: 1e-5,
    unit: "F",
    label: LabelStyle::Numbered('C'),
};

const SOURCE: KindSpec = KindSpec {
    default_value: 10.0,
    unit: "V",
    label: LabelStyle::Fixed("SOURCE"),
};

// Ground carries no electrical value.
const GROUND: KindSpec = KindSpec {
    default_value: 0.0,
    unit: "V",
    label: LabelStyle::Fixed("GND"),
};

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Resistor,
        ComponentKind::Inductor,
        ComponentKind::Capacitor,
        ComponentKind::Source,
        ComponentKind::Ground,
    ];

    /// Look up the placement defaults for this kind.
    pub fn spec(&self) -> &'static KindSpec {
        match self {
            ComponentKind::Resistor => &RESISTOR,
            ComponentKind::Inductor => &INDUCTOR,
            ComponentKind::Capacitor => &CAPACITOR,
            ComponentKind::Source => &SOURCE,
            ComponentKind::Ground => &GROUND,
        }
    }

    /// Build the label for a new component, given how many components of the
    /// same kind are already placed.
    pub fn label_for(&self, existing: usize) -> String {
        match self.spec().label {
            LabelStyle::Numbered(prefix) => format!("{}{}", prefix, existing + 1),
            LabelStyle::Fixed(label) => label.to_string(),
        }
    }

    /// Parse a kind from a keyword such as `R`, `cap` or `ground`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "R" | "RES" | "RESISTOR" => Some(Self::Resistor),
            "L" | "IND" | "INDUCTOR" => Some(Self::Inductor),
            "C" | "CAP" | "CAPACITOR" => Some(Self::Capacitor),
            "V" | "SRC" | "SOURCE" => Some(Self::Source),
            "GND" | "GROUND" => Some(Self::Ground),
            _ => None,
        }
    }

    /// The lowercase name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Inductor => "inductor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Source => "source",
            ComponentKind::Ground => "ground",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ComponentKind::Resistor.label_for(0), "R1");
        assert_eq!(ComponentKind::Capacitor.label_for(2), "C3");
        assert_eq!(ComponentKind::Inductor.label_for(0), "L1");
        assert_eq!(ComponentKind::Source.label_for(4), "SOURCE");
        assert_eq!(ComponentKind::Ground.label_for(1), "GND");
    }

    #[test]
    fn test_units_and_defaults() {
        assert_eq!(ComponentKind::Resistor.spec().unit, "Ω");
        assert_eq!(ComponentKind::Capacitor.spec().default_value, 1e-5);
        assert_eq!(ComponentKind::Inductor.spec().unit, "H");
        assert_eq!(ComponentKind::Source.spec().default_value, 10.0);
        assert_eq!(ComponentKind::Ground.spec().default_value, 0.0);
    }

    #[test]
    fn test_keywords_round_trip_names() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_keyword(kind.name()), Some(kind));
        }
        assert_eq!(ComponentKind::from_keyword("cap"), Some(ComponentKind::Capacitor));
        assert_eq!(ComponentKind::from_keyword("Q"), None);
    }
}
