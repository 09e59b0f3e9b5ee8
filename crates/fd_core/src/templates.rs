//! Canonical formation templates.
//!
//! A template is a named, fixed list of nominal role coordinates for one
//! formation, independent of any match. Coordinates are in pitch meters
//! with x measured from the own goal line toward the opponent goal and y
//! across the width; absolute units do not matter because every template is
//! min-max normalized immediately before comparison.
//!
//! The built-in library covers the common outfield shapes (goalkeeper
//! excluded, 10 points each). Custom libraries load from JSON.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, Result};
use crate::pitch::PitchPos;

/// Minimum points for a usable template; below this min-max normalization
/// cannot produce a comparable shape.
pub const MIN_TEMPLATE_POINTS: usize = 2;

/// Named canonical formation shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    name: String,
    points: Vec<PitchPos>,
}

impl Template {
    pub fn new(name: impl Into<String>, points: Vec<PitchPos>) -> Result<Self> {
        let name = name.into();
        if points.len() < MIN_TEMPLATE_POINTS {
            return Err(DetectionError::TemplateTooSmall {
                name,
                found: points.len(),
                minimum: MIN_TEMPLATE_POINTS,
            });
        }
        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[PitchPos] {
        &self.points
    }
}

/// Named collection of formation templates, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template; names must be unique within the library.
    pub fn insert(&mut self, template: Template) -> Result<()> {
        if self.get(template.name()).is_some() {
            return Err(DetectionError::DuplicateTemplate { name: template.name().to_string() });
        }
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Loads a library from its JSON form and re-validates every entry.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: TemplateLibrary = serde_json::from_str(json)?;
        let mut library = TemplateLibrary::new();
        for template in parsed.templates {
            library.insert(Template::new(template.name, template.points)?)?;
        }
        Ok(library)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Built-in library of common 10-outfield-role formations.
    pub fn builtin() -> &'static TemplateLibrary {
        static BUILTIN: Lazy<TemplateLibrary> = Lazy::new(builtin_library);
        &BUILTIN
    }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

fn builtin_library() -> TemplateLibrary {
    let shapes: [(&str, [PitchPos; 10]); 11] = [
        (
            "4-4-2",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (42.0, 10.0), (42.0, 26.0), (42.0, 42.0), (42.0, 58.0),
                (65.0, 26.0), (65.0, 42.0),
            ],
        ),
        (
            "4-3-3",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (40.0, 20.0), (38.0, 34.0), (40.0, 48.0),
                (62.0, 12.0), (68.0, 34.0), (62.0, 56.0),
            ],
        ),
        (
            "4-2-3-1",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (35.0, 25.0), (35.0, 43.0),
                (50.0, 18.0), (50.0, 34.0), (50.0, 50.0),
                (70.0, 34.0),
            ],
        ),
        (
            "4-5-1",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (42.0, 8.0), (38.0, 24.0), (36.0, 34.0), (38.0, 44.0), (42.0, 60.0),
                (65.0, 34.0),
            ],
        ),
        (
            "3-5-2",
            [
                (20.0, 20.0), (20.0, 34.0), (20.0, 48.0),
                (30.0, 10.0), (30.0, 58.0),
                (40.0, 24.0), (40.0, 34.0), (40.0, 44.0),
                (65.0, 28.0), (65.0, 40.0),
            ],
        ),
        (
            "3-4-3",
            [
                (20.0, 20.0), (18.0, 34.0), (20.0, 48.0),
                (40.0, 10.0), (38.0, 26.0), (38.0, 42.0), (40.0, 58.0),
                (62.0, 14.0), (66.0, 34.0), (62.0, 54.0),
            ],
        ),
        (
            "4-4-2-diamond",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (34.0, 34.0), (44.0, 20.0), (44.0, 48.0), (54.0, 34.0),
                (66.0, 26.0), (66.0, 42.0),
            ],
        ),
        (
            "4-1-4-1",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (32.0, 34.0),
                (46.0, 10.0), (44.0, 26.0), (44.0, 42.0), (46.0, 58.0),
                (66.0, 34.0),
            ],
        ),
        (
            "4-4-1-1",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (42.0, 10.0), (40.0, 26.0), (40.0, 42.0), (42.0, 58.0),
                (56.0, 34.0), (68.0, 34.0),
            ],
        ),
        (
            "4-3-1-2",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (38.0, 22.0), (36.0, 34.0), (38.0, 46.0),
                (52.0, 34.0),
                (66.0, 27.0), (66.0, 41.0),
            ],
        ),
        (
            "4-2-2-2",
            [
                (20.0, 10.0), (20.0, 25.0), (20.0, 43.0), (20.0, 58.0),
                (35.0, 25.0), (35.0, 43.0),
                (52.0, 16.0), (52.0, 52.0),
                (68.0, 27.0), (68.0, 41.0),
            ],
        ),
    ];

    let mut library = TemplateLibrary::new();
    for (name, points) in shapes {
        let template =
            Template::new(name, points.to_vec()).expect("built-in template has enough points");
        library.insert(template).expect("built-in template names are unique");
    }
    library
}
