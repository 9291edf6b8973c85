//! Arena-backed Barnes-Hut quadtree.
//!
//! Nodes live in a single `Vec` and refer to their children by index, so a tree
//! is one allocation that is built at the start of a step and dropped at the end
//! of it. Every node keeps a running total mass and center of mass that is
//! updated as bodies pass through it on insertion, so the tree is ready for force
//! evaluation as soon as the last body is inserted.
//!
//! # Example
//!
//! ```
//! use rs_nbody::bodies::Body;
//! use rs_nbody::tree::{QuadTree, Region};
//!
//! let bodies = vec![
//!     Body::new(0, (1.0, 1.0), (0.0, 0.0), 1.0).unwrap(),
//!     Body::new(1, (3.0, 3.0), (0.0, 0.0), 3.0).unwrap(),
//! ];
//! let tree = QuadTree::build(&bodies, Region::domain(4.0)).expect("bodies lie in the domain");
//!
//! assert_eq!(tree.root().total_mass, 4.0);
//! assert_eq!(tree.root().center_of_mass, (2.5, 2.5));
//! ```
use log::{error, warn};

use crate::bodies::Body;
use crate::tree::{Quadrant, Region};
use crate::utils::{weighted_average, SimulationError, MAX_TREE_DEPTH};

/// Index of a node inside a `QuadTree` arena.
pub type NodeId = usize;

/// The root is always the first node in the arena.
pub const ROOT: NodeId = 0;

/// Copy of the parts of a body a tree needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    /// Position of the body in the step's working slice; used as its identity.
    pub index: usize,
    pub id: usize,
    pub position: (f64, f64),
    pub mass: f64,
}

impl Occupant {
    pub fn from_body(index: usize, body: &Body) -> Self {
        Occupant {
            index,
            id: body.id,
            position: body.position,
            mass: body.mass,
        }
    }
}

/// A single node of the tree.
///
/// A node is either a leaf, holding its bodies in `occupants`, or internal, with
/// exactly four children and no occupants. Leaves hold at most one body unless
/// they sit at the depth cap.
#[derive(Debug, Clone)]
pub struct Node {
    pub region: Region,
    pub occupants: Vec<Occupant>,
    pub center_of_mass: (f64, f64),
    pub total_mass: f64,
    /// Number of bodies stored anywhere below this node.
    pub body_count: usize,
    /// Child indices in `Quadrant::ALL` order, present once subdivided.
    pub children: Option<[NodeId; 4]>,
    pub depth: u32,
}

impl Node {
    fn new(region: Region, depth: u32) -> Self {
        Node {
            region,
            occupants: Vec::new(),
            center_of_mass: (0.0, 0.0),
            total_mass: 0.0,
            body_count: 0,
            children: None,
            depth,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_subdivided(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.body_count == 0
    }

    /// Folds one more body into the running mass summary.
    fn absorb(&mut self, occupant: &Occupant) {
        self.center_of_mass = weighted_average(
            self.center_of_mass,
            self.total_mass,
            occupant.position,
            occupant.mass,
        );
        self.total_mass += occupant.mass;
        self.body_count += 1;
    }
}

/// A quadtree over a fixed region, stored as an arena of nodes.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    max_depth: u32,
}

impl QuadTree {
    /// Creates a tree holding a single empty leaf covering `region`.
    pub fn new(region: Region) -> Self {
        Self::with_max_depth(region, MAX_TREE_DEPTH)
    }

    /// Creates an empty tree whose leaves stop subdividing at `max_depth`.
    pub fn with_max_depth(region: Region, max_depth: u32) -> Self {
        QuadTree {
            nodes: vec![Node::new(region, 0)],
            max_depth,
        }
    }

    /// Builds a tree over `region` from every active body in `bodies`.
    ///
    /// Escaped bodies are skipped. Occupants are identified by their index in `bodies`.
    ///
    /// # Errors
    ///
    /// Returns `BodyOutsideRegion` if an active body is not inside `region`, and
    /// `StructuralInsertion` if the tree fails to place a body it should accept.
    pub fn build(bodies: &[Body], region: Region) -> Result<Self, SimulationError> {
        let mut tree = QuadTree::new(region);
        // Four nodes per subdivision, roughly one subdivision per body.
        tree.nodes.reserve(bodies.len() * 4);
        for (index, body) in bodies.iter().enumerate() {
            if !body.is_active() {
                continue;
            }
            if !tree.insert(index, body)? {
                return Err(SimulationError::BodyOutsideRegion { id: body.id });
            }
        }
        Ok(tree)
    }

    /// Inserts `body` (at position `index` of its working slice) into the tree.
    ///
    /// Returns `Ok(false)` without touching the tree if the body has escaped or lies
    /// outside the root region.
    ///
    /// # Errors
    ///
    /// Returns `StructuralInsertion` if a body within a node's region is refused by
    /// all four of its children.
    pub fn insert(&mut self, index: usize, body: &Body) -> Result<bool, SimulationError> {
        if !body.is_active() {
            return Ok(false);
        }
        self.insert_at(ROOT, Occupant::from_body(index, body))
    }

    fn insert_at(&mut self, node_id: NodeId, occupant: Occupant) -> Result<bool, SimulationError> {
        let max_depth = self.max_depth;
        let node = &mut self.nodes[node_id];
        if !node.region.contains(occupant.position) {
            return Ok(false);
        }

        if node.is_leaf() {
            if node.occupants.is_empty() {
                node.occupants.push(occupant);
                node.absorb(&occupant);
                return Ok(true);
            }
            if node.depth >= max_depth {
                warn!(
                    "Body #{} shares a depth-{} leaf with {} other bodies",
                    occupant.id,
                    node.depth,
                    node.occupants.len()
                );
                node.occupants.push(occupant);
                node.absorb(&occupant);
                return Ok(true);
            }

            // Occupied leaf: push the current residents down a level. The node's
            // summary already accounts for them.
            let residents = std::mem::take(&mut node.occupants);
            let children = self.subdivide(node_id);
            for resident in residents {
                if !self.insert_into_children(children, resident)? {
                    error!("Error redistributing body #{} during subdivision", resident.id);
                    return Err(SimulationError::StructuralInsertion { id: resident.id });
                }
            }
        }

        let node = &mut self.nodes[node_id];
        node.absorb(&occupant);
        let Some(children) = node.children else {
            return Err(SimulationError::StructuralInsertion { id: occupant.id });
        };
        if self.insert_into_children(children, occupant)? {
            Ok(true)
        } else {
            error!("Body #{} was refused by every child region", occupant.id);
            Err(SimulationError::StructuralInsertion { id: occupant.id })
        }
    }

    fn insert_into_children(
        &mut self,
        children: [NodeId; 4],
        occupant: Occupant,
    ) -> Result<bool, SimulationError> {
        for child in children {
            if self.insert_at(child, occupant)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Creates the four children of a leaf and returns their indices.
    ///
    /// Subdividing an internal node returns its existing children untouched.
    fn subdivide(&mut self, node_id: NodeId) -> [NodeId; 4] {
        if let Some(children) = self.nodes[node_id].children {
            return children;
        }
        let region = self.nodes[node_id].region;
        let depth = self.nodes[node_id].depth + 1;
        let first = self.nodes.len();
        for quadrant in Quadrant::ALL {
            self.nodes.push(Node::new(region.quadrant(quadrant), depth));
        }
        let children = [first, first + 1, first + 2, first + 3];
        self.nodes[node_id].children = Some(children);
        children
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no body has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    pub fn region(&self) -> Region {
        self.root().region
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Deepest level any node reached.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Finds the leaf holding the body stored at `index`, if any.
    pub fn leaf_of(&self, index: usize) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.is_leaf() && n.occupants.iter().any(|o| o.index == index))
    }
}
