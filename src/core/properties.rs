// Copyright @yucwang 2026

use crate::core::error::{ RenderError, Result };
use crate::math::constants::{ Float, Int, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Integer(Int),
    Float(Float),
    Boolean(bool),
    String(String),
    Color(RGBSpectrum),
    Point(Vector3f),
    Vector(Vector3f),
}

impl Property {
    fn type_name(&self) -> &'static str {
        match self {
            Property::Integer(_) => "integer",
            Property::Float(_) => "float",
            Property::Boolean(_) => "boolean",
            Property::String(_) => "string",
            Property::Color(_) => "color",
            Property::Point(_) => "point",
            Property::Vector(_) => "vector",
        }
    }
}

/// String keyed parameters handed to a node at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    props: HashMap<String, Property>,
}

macro_rules! typed_getter {
    ($get:ident, $get_required:ident, $variant:ident, $ty:ty, $expected:expr) => {
        pub fn $get(&self, name: &str, default: $ty) -> Result<$ty> {
            match self.props.get(name) {
                None => Ok(default),
                Some(Property::$variant(v)) => Ok(v.clone()),
                Some(_) => Err(RenderError::PropertyType {
                    name: name.to_string(), expected: $expected }),
            }
        }

        pub fn $get_required(&self, name: &str) -> Result<$ty> {
            match self.props.get(name) {
                None => Err(RenderError::InvalidProperty {
                    name: name.to_string(), reason: String::from("property is required") }),
                Some(Property::$variant(v)) => Ok(v.clone()),
                Some(_) => Err(RenderError::PropertyType {
                    name: name.to_string(), expected: $expected }),
            }
        }
    };
}

impl PropertyList {
    pub fn new() -> Self {
        Self { props: HashMap::new() }
    }

    pub fn set(&mut self, name: &str, value: Property) {
        if let Some(old) = self.props.insert(name.to_string(), value) {
            log::warn!("property `{}` ({}) was specified twice", name, old.type_name());
        }
    }

    pub fn set_integer(&mut self, name: &str, value: Int) {
        self.set(name, Property::Integer(value));
    }

    pub fn set_float(&mut self, name: &str, value: Float) {
        self.set(name, Property::Float(value));
    }

    pub fn set_boolean(&mut self, name: &str, value: bool) {
        self.set(name, Property::Boolean(value));
    }

    pub fn set_string(&mut self, name: &str, value: &str) {
        self.set(name, Property::String(value.to_string()));
    }

    pub fn set_color(&mut self, name: &str, value: RGBSpectrum) {
        self.set(name, Property::Color(value));
    }

    pub fn set_point(&mut self, name: &str, value: Vector3f) {
        self.set(name, Property::Point(value));
    }

    pub fn set_vector(&mut self, name: &str, value: Vector3f) {
        self.set(name, Property::Vector(value));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    typed_getter!(get_integer, get_integer_required, Integer, Int, "integer");
    typed_getter!(get_float, get_float_required, Float, Float, "float");
    typed_getter!(get_boolean, get_boolean_required, Boolean, bool, "boolean");
    typed_getter!(get_string, get_string_required, String, String, "string");
    typed_getter!(get_color, get_color_required, Color, RGBSpectrum, "color");
    typed_getter!(get_point, get_point_required, Point, Vector3f, "point");
    typed_getter!(get_vector, get_vector_required, Vector, Vector3f, "vector");
}

#[cfg(test)]
mod tests {
    use super::PropertyList;
    use crate::core::error::RenderError;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_property_defaults_and_types() {
        let mut props = PropertyList::new();
        props.set_integer("photonCount", 500);
        props.set_float("photonRadius", 0.25);
        props.set_color("albedo", RGBSpectrum::splat(0.5));

        assert_eq!(props.get_integer("photonCount", 1000000).unwrap(), 500);
        assert_eq!(props.get_float("photonRadius", 0.0).unwrap(), 0.25);
        assert_eq!(props.get_float("missing", 3.0).unwrap(), 3.0);
        assert_eq!(props.get_color("albedo", RGBSpectrum::default()).unwrap(),
                   RGBSpectrum::splat(0.5));

        match props.get_float("photonCount", 0.0) {
            Err(RenderError::PropertyType { name, expected }) => {
                assert_eq!(name, "photonCount");
                assert_eq!(expected, "float");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_property_required() {
        let props = PropertyList::new();
        assert!(matches!(props.get_float_required("length"),
                         Err(RenderError::InvalidProperty { .. })));
    }
}
