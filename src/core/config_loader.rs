// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{ BytesStart, Event };
use quick_xml::Reader;

use crate::core::error::{ RenderError, Result };
use crate::core::properties::PropertyList;
use crate::math::constants::{ Float, Int, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Integrator block read from an XML fragment such as
///
/// ```xml
/// <scene>
///     <default name="count" value="1000"/>
///     <integrator type="photonmapper">
///         <integer name="photonCount" value="$count"/>
///         <float name="photonRadius" value="0.05"/>
///     </integrator>
/// </scene>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorConfig {
    pub kind: String,
    pub props: PropertyList,
}

pub fn load_integrator_config<P: AsRef<Path>>(path: P) -> Result<IntegratorConfig> {
    let xml = fs::read_to_string(path.as_ref())?;
    log::info!("Loading integrator configuration from {}.", path.as_ref().display());
    parse_integrator_config(&xml)
}

pub fn parse_integrator_config(xml: &str) -> Result<IntegratorConfig> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut kind: Option<String> = None;
    let mut in_integrator = false;
    let mut props = PropertyList::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let attrs = attributes(&e, &defaults)?;
                match e.name().as_ref() {
                    b"default" => {
                        if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                            defaults.insert(k.clone(), v.clone());
                        }
                    }
                    b"integrator" => {
                        if kind.is_some() {
                            return Err(RenderError::Parse(String::from("more than one integrator")));
                        }
                        let ty = attrs.get("type")
                            .ok_or_else(|| RenderError::Parse(String::from("integrator without type")))?;
                        kind = Some(ty.clone());
                        in_integrator = true;
                    }
                    tag if in_integrator => {
                        let tag = String::from_utf8_lossy(tag).to_string();
                        parse_property(&tag, &attrs, &mut props)?;
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"integrator" {
                    in_integrator = false;
                }
            }
            Err(e) => {
                return Err(RenderError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    let kind = kind.ok_or_else(|| RenderError::Parse(String::from("no integrator found")))?;
    Ok(IntegratorConfig { kind, props })
}

fn attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| RenderError::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().map_err(|err| RenderError::Parse(err.to_string()))?;
        out.insert(key, resolve_value(&value, defaults));
    }
    Ok(out)
}

fn parse_property(tag: &str, attrs: &HashMap<String, String>, props: &mut PropertyList) -> Result<()> {
    let name = attrs.get("name")
        .ok_or_else(|| RenderError::Parse(format!("<{}> without name", tag)))?;
    let value = attrs.get("value")
        .ok_or_else(|| RenderError::Parse(format!("property `{}` without value", name)))?;

    match tag {
        "integer" => props.set_integer(name, parse_int(value)?),
        "float" => props.set_float(name, parse_float(value)?),
        "boolean" => props.set_boolean(name, parse_bool(value)?),
        "string" => props.set_string(name, value),
        "color" => props.set_color(name, parse_color(value)?),
        "point" => props.set_point(name, parse_vec3(value)?),
        "vector" => props.set_vector(name, parse_vec3(value)?),
        other => return Err(RenderError::Parse(format!("unknown property type <{}>", other))),
    }
    Ok(())
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float> {
    value.trim().parse::<Float>().map_err(|_| RenderError::Parse(format!("invalid float: {}", value)))
}

fn parse_int(value: &str) -> Result<Int> {
    value.trim().parse::<Int>().map_err(|_| RenderError::Parse(format!("invalid integer: {}", value)))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(RenderError::Parse(format!("invalid boolean: {}", value))),
    }
}

fn parse_vec3(value: &str) -> Result<Vector3f> {
    let parts: Vec<&str> = value.split(|c| c == ',' || c == ' ')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(RenderError::Parse(format!("invalid vec3: {}", value)));
    }
    Ok(Vector3f::new(parse_float(parts[0])?, parse_float(parts[1])?, parse_float(parts[2])?))
}

fn parse_color(value: &str) -> Result<RGBSpectrum> {
    if let Ok(v) = parse_float(value) {
        return Ok(RGBSpectrum::splat(v));
    }
    let v = parse_vec3(value)?;
    Ok(RGBSpectrum::new(v.x, v.y, v.z))
}
