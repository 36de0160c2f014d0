pub mod configs;
pub mod library;

use serde::{Deserialize, Serialize};

/// The six component kinds a weapon is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Receiver,
    Barrel,
    Stock,
    Magazine,
    Scope,
    Grip,
}

impl PartKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Receiver => "Receiver",
            Self::Barrel => "Barrel",
            Self::Stock => "Stock",
            Self::Magazine => "Magazine",
            Self::Scope => "Scope",
            Self::Grip => "Grip",
        }
    }
}

/// Dimensional specification for one component. All fields optional;
/// absent values fall back to the per-kind defaults at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub length: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub diameter: Option<f32>,
    pub depth: Option<f32>,
    /// Edge rounding amount (visual only).
    pub fillet: Option<f32>,
    /// Sweep offset for curved magazines.
    pub curve: Option<f32>,
    /// Round count, magazines only.
    pub capacity: Option<u32>,
}

/// Fully resolved dimensions for one part kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartDims {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub diameter: f32,
    pub depth: f32,
}

impl PartKind {
    /// Library defaults for dimensional fields absent from a spec.
    pub fn default_dims(self) -> PartDims {
        match self {
            Self::Receiver => PartDims { length: 10.0, width: 4.0, height: 6.0, diameter: 0.0, depth: 0.0 },
            Self::Barrel => PartDims { length: 40.0, width: 0.0, height: 0.0, diameter: 1.5, depth: 0.0 },
            Self::Stock => PartDims { length: 12.0, width: 3.0, height: 5.0, diameter: 0.0, depth: 0.0 },
            Self::Magazine => PartDims { length: 16.0, width: 2.5, height: 5.0, diameter: 0.0, depth: 0.0 },
            Self::Scope => PartDims { length: 8.0, width: 0.0, height: 0.0, diameter: 2.0, depth: 0.0 },
            Self::Grip => PartDims { length: 0.0, width: 2.0, height: 8.0, diameter: 0.0, depth: 2.5 },
        }
    }
}

impl PartSpec {
    /// Resolve this spec against the defaults for `kind`.
    pub fn resolve(&self, kind: PartKind) -> PartDims {
        let d = kind.default_dims();
        PartDims {
            length: self.length.unwrap_or(d.length),
            width: self.width.unwrap_or(d.width),
            height: self.height.unwrap_or(d.height),
            diameter: self.diameter.unwrap_or(d.diameter),
            depth: self.depth.unwrap_or(d.depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_resolves_to_kind_defaults() {
        let dims = PartSpec::default().resolve(PartKind::Barrel);
        assert_eq!(dims.length, 40.0);
        assert_eq!(dims.diameter, 1.5);

        let dims = PartSpec::default().resolve(PartKind::Magazine);
        assert_eq!(dims.length, 16.0);
        assert_eq!(dims.width, 2.5);
        assert_eq!(dims.height, 5.0);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let spec = PartSpec {
            length: Some(55.0),
            ..Default::default()
        };
        let dims = spec.resolve(PartKind::Barrel);
        assert_eq!(dims.length, 55.0);
        // untouched fields still fall back
        assert_eq!(dims.diameter, 1.5);
    }
}
