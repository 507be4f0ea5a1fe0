//! Static collision world
//!
//! Owns every static collider in a flat arena and the quad-tree built over
//! their horizontal bounds. Detection runs in two phases: a broad-phase
//! quad-tree query on the dynamic shape's bounds, then the narrow phase on
//! each candidate. Contacts are handed to a caller-supplied closure.
//!
//! The world has two stages. While loading, colliders may be inserted.
//! After [`CollisionWorld::build_index`] the world is read-only and only
//! answers queries.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::WorldConfig;
use crate::physics::collision::{Aabb, Collider, ColliderShape, Collision, CourseId};
use crate::physics::descriptor::{self, DescriptorError};
use crate::spatial::{QuadEntry, QuadTree, QuadTreeConfig};

/// Errors raised while loading or building the collision world
#[derive(Error, Debug)]
pub enum CollisionError {
    /// Descriptor file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to open
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A descriptor line was malformed
    #[error("descriptor line {line}: {reason}")]
    Descriptor {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        #[source]
        reason: DescriptorError,
    },

    /// The index was already built; the world is read-only
    #[error("collision index already built")]
    IndexAlreadyBuilt,
}

/// Static collider arena plus its broad-phase index
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    colliders: Vec<ColliderShape>,
    index: QuadTree,
    built: bool,
}

impl CollisionWorld {
    /// Create an empty world whose index covers `bounds`
    pub fn new(bounds: Aabb, config: QuadTreeConfig) -> Self {
        Self {
            colliders: Vec::new(),
            index: QuadTree::new(bounds, config),
            built: false,
        }
    }

    /// Create an empty world from configuration
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(
            Aabb::new(config.min(), config.max()),
            QuadTreeConfig {
                split_threshold: config.split_threshold,
                max_depth: config.max_depth,
            },
        )
    }

    /// Add a static collider, returning its stable arena index
    pub fn insert_static(
        &mut self,
        collider: impl Into<ColliderShape>,
    ) -> Result<usize, CollisionError> {
        if self.built {
            return Err(CollisionError::IndexAlreadyBuilt);
        }
        let index = self.colliders.len();
        self.colliders.push(collider.into());
        Ok(index)
    }

    /// Load box descriptors from a file, tagging each box with `tag`.
    ///
    /// Returns the number of boxes added. On a malformed line the load
    /// stops; boxes from earlier lines stay in the world.
    pub fn load_descriptors(
        &mut self,
        path: impl AsRef<Path>,
        tag: Option<CourseId>,
    ) -> Result<usize, CollisionError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            log::error!("Failed to read collision descriptors {}: {}", path.display(), source);
            CollisionError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let added = self.load_descriptor_str(&source, tag)?;
        log::info!("Loaded {} colliders from {}", added, path.display());
        Ok(added)
    }

    /// Load box descriptors from in-memory text
    pub fn load_descriptor_str(
        &mut self,
        source: &str,
        tag: Option<CourseId>,
    ) -> Result<usize, CollisionError> {
        let mut added = 0;
        for (line_index, line) in source.lines().enumerate() {
            let parsed = descriptor::parse_line(line).map_err(|reason| {
                log::error!("Bad collision descriptor on line {}: {}", line_index + 1, reason);
                CollisionError::Descriptor {
                    line: line_index + 1,
                    reason,
                }
            })?;

            if let Some(mut shape) = parsed {
                shape.set_tag(tag);
                self.insert_static(shape)?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Insert every collider into the quad-tree.
    ///
    /// Called exactly once, after all geometry is loaded.
    pub fn build_index(&mut self) -> Result<(), CollisionError> {
        if self.built {
            return Err(CollisionError::IndexAlreadyBuilt);
        }

        for (index, collider) in self.colliders.iter().enumerate() {
            self.index.insert(QuadEntry::new(collider.aabb(), index));
        }
        self.built = true;

        log::info!(
            "Built collision index: {} colliders, {} nodes, depth {}",
            self.colliders.len(),
            self.index.node_count(),
            self.index.depth()
        );
        self.index.log_structure();
        Ok(())
    }

    /// Report every static collider penetrating `dynamic`.
    ///
    /// `on_collision` runs synchronously once per contact, in arena order.
    /// Returns the number of contacts reported.
    pub fn query<F>(&self, dynamic: &dyn Collider, mut on_collision: F) -> usize
    where
        F: FnMut(Collision),
    {
        if !self.built {
            log::warn!("Collision query before the index was built; ignoring");
            return 0;
        }

        let mut contacts = 0;
        for index in self.index.query(&dynamic.aabb()) {
            let Some(candidate) = self.colliders.get(index) else {
                continue;
            };
            if !(candidate.collides_with(dynamic) && dynamic.collides_with(candidate)) {
                continue;
            }
            if let Some(collision) = candidate.compute_impulse(dynamic) {
                log::trace!(
                    "Contact with collider {}: normal {:?}, depth {:.4}",
                    index,
                    collision.normal,
                    collision.depth
                );
                on_collision(collision);
                contacts += 1;
            }
        }
        contacts
    }

    /// Collect every contact with `dynamic` into a vector
    pub fn collect_collisions(&self, dynamic: &dyn Collider) -> Vec<Collision> {
        let mut collisions = Vec::new();
        self.query(dynamic, |collision| collisions.push(collision));
        collisions
    }

    /// Collider at an arena index
    pub fn collider(&self, index: usize) -> Option<&ColliderShape> {
        self.colliders.get(index)
    }

    /// Number of static colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the world holds no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Whether [`CollisionWorld::build_index`] has run
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The broad-phase index
    pub fn index(&self) -> &QuadTree {
        &self.index
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}
