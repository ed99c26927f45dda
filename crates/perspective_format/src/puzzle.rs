//! Puzzle scene model

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Which flavour of the text format a puzzle needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Type and colour only, no sky, scenery, dialog or target
    #[default]
    Basic,
    /// Mesh, texture, material and shader columns plus the extra records
    Extended,
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

impl std::str::FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "extended" => Ok(Self::Extended),
            _ => Err(format!("Unknown schema: {}", s)),
        }
    }
}

/// Scene boundary drawn around the puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Mesh name (the outline type in basic puzzles)
    pub mesh: String,
    pub colour: String,
    pub texture: String,
    pub material: String,
    pub shader: String,
}

impl Outline {
    /// Create an outline
    pub fn new(mesh: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            colour: colour.into(),
            ..Default::default()
        }
    }

    /// Set texture, material and shader
    pub fn with_style(
        mut self,
        texture: impl Into<String>,
        material: impl Into<String>,
        shader: impl Into<String>,
    ) -> Self {
        self.texture = texture.into();
        self.material = material.into();
        self.shader = shader.into();
        self
    }
}

/// Backdrop surrounding the scene
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sky {
    pub name: String,
    pub mesh: String,
    pub colour: String,
    pub texture: String,
    pub material: String,
    pub shader: String,
}

impl Sky {
    /// Create a sky
    pub fn new(name: impl Into<String>, mesh: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            colour: colour.into(),
            ..Default::default()
        }
    }

    /// Set texture, material and shader
    pub fn with_style(
        mut self,
        texture: impl Into<String>,
        material: impl Into<String>,
        shader: impl Into<String>,
    ) -> Self {
        self.texture = texture.into();
        self.material = material.into();
        self.shader = shader.into();
        self
    }
}

// Constructors shared by every entity placed at a grid location.
macro_rules! placed_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,
            /// Mesh name (the entity type in basic puzzles)
            pub mesh: String,
            pub colour: String,
            pub location: Location,
            pub texture: String,
            pub material: String,
            pub shader: String,
        }

        impl $name {
            /// Create an entity at a location
            pub fn new(
                name: impl Into<String>,
                mesh: impl Into<String>,
                colour: impl Into<String>,
                location: Location,
            ) -> Self {
                Self {
                    name: name.into(),
                    mesh: mesh.into(),
                    colour: colour.into(),
                    location,
                    ..Default::default()
                }
            }

            /// Set texture, material and shader
            pub fn with_style(
                mut self,
                texture: impl Into<String>,
                material: impl Into<String>,
                shader: impl Into<String>,
            ) -> Self {
                self.texture = texture.into();
                self.material = material.into();
                self.shader = shader.into();
                self
            }
        }
    };
}

placed_entity!(
    /// Solid block
    Block
);
placed_entity!(
    /// Target cell a block must reach
    Goal
);
placed_entity!(
    /// Player sphere
    Sphere
);
placed_entity!(
    /// Decorative, non-interactive entity
    Scenery
);

/// Teleporter between two locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub name: String,
    pub mesh: String,
    pub colour: String,
    pub location: Location,
    /// Destination of the teleport
    pub link: Location,
    pub texture: String,
    pub material: String,
    pub shader: String,
}

impl Portal {
    /// Create a portal linking `location` to `link`
    pub fn new(
        name: impl Into<String>,
        mesh: impl Into<String>,
        colour: impl Into<String>,
        location: Location,
        link: Location,
    ) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            colour: colour.into(),
            location,
            link,
            ..Default::default()
        }
    }

    /// Set texture, material and shader
    pub fn with_style(
        mut self,
        texture: impl Into<String>,
        material: impl Into<String>,
        shader: impl Into<String>,
    ) -> Self {
        self.texture = texture.into();
        self.material = material.into();
        self.shader = shader.into();
        self
    }
}

/// Narrative or UI element shown in the scene
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    pub name: String,
    /// Dialog type, written as the `type` column
    pub kind: String,
    pub background_colour: String,
    pub foreground_colour: String,
    pub author: String,
    pub content: String,
    pub location: Location,
    /// Identifiers of the elements this dialog refers to
    pub elements: Vec<String>,
}

impl Dialog {
    /// Create a dialog
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set colours
    pub fn with_colours(mut self, background: impl Into<String>, foreground: impl Into<String>) -> Self {
        self.background_colour = background.into();
        self.foreground_colour = foreground.into();
        self
    }

    /// Set author and content
    pub fn with_text(mut self, author: impl Into<String>, content: impl Into<String>) -> Self {
        self.author = author.into();
        self.content = content.into();
        self
    }

    /// Set location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Add a referenced element
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.elements.push(element.into());
        self
    }
}

/// A complete puzzle definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub description: String,
    /// Target move count
    pub target: u32,
    pub outline: Option<Outline>,
    pub sky: Vec<Sky>,
    pub block: Vec<Block>,
    pub goal: Vec<Goal>,
    pub portal: Vec<Portal>,
    pub sphere: Vec<Sphere>,
    pub scenery: Vec<Scenery>,
    pub dialog: Vec<Dialog>,
}

impl Puzzle {
    /// Create an empty puzzle
    pub fn new() -> Self {
        Self::default()
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set target
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    /// Set outline
    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn with_sky(mut self, sky: Sky) -> Self {
        self.sky.push(sky);
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.block.push(block);
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal.push(goal);
        self
    }

    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portal.push(portal);
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.sphere.push(sphere);
        self
    }

    pub fn with_scenery(mut self, scenery: Scenery) -> Self {
        self.scenery.push(scenery);
        self
    }

    pub fn with_dialog(mut self, dialog: Dialog) -> Self {
        self.dialog.push(dialog);
        self
    }

    /// Check if the puzzle has no content at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of entities of every kind, outline included
    pub fn entity_count(&self) -> usize {
        usize::from(self.outline.is_some())
            + self.sky.len()
            + self.block.len()
            + self.goal.len()
            + self.portal.len()
            + self.sphere.len()
            + self.scenery.len()
            + self.dialog.len()
    }

    /// Infer the text schema from the populated fields
    pub fn schema(&self) -> Schema {
        let styled = |texture: &str, material: &str, shader: &str| {
            !texture.is_empty() || !material.is_empty() || !shader.is_empty()
        };

        let extended = self.target != 0
            || !self.sky.is_empty()
            || !self.scenery.is_empty()
            || !self.dialog.is_empty()
            || self
                .outline
                .as_ref()
                .map(|o| styled(&o.texture, &o.material, &o.shader))
                .unwrap_or(false)
            || self.block.iter().any(|b| styled(&b.texture, &b.material, &b.shader))
            || self.goal.iter().any(|g| styled(&g.texture, &g.material, &g.shader))
            || self.portal.iter().any(|p| styled(&p.texture, &p.material, &p.shader))
            || self.sphere.iter().any(|s| styled(&s.texture, &s.material, &s.shader));

        if extended {
            Schema::Extended
        } else {
            Schema::Basic
        }
    }
}
