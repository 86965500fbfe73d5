//! Ephemeral BSP partition used during generation.
//!
//! Regions live in an arena with explicit parent/child links; the adjacency
//! tag on each node points toward its sibling so a generator knows which
//! edge the two regions share. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;
use crate::GenRng;

/// Axis-aligned rectangle (top-left corner plus extent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    pub const fn center(&self) -> Coordinate {
        Coordinate::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn contains(&self, c: Coordinate) -> bool {
        c.x >= self.x && c.x < self.right() && c.y >= self.y && c.y < self.bottom()
    }

    /// Check if two rectangles overlap, with `buffer` cells of required
    /// clearance around each.
    pub fn overlaps(&self, other: &Rect, buffer: i32) -> bool {
        !(self.right() + buffer <= other.x
            || other.right() + buffer <= self.x
            || self.bottom() + buffer <= other.y
            || other.bottom() + buffer <= self.y)
    }

    /// Shrink equally on all sides. Degenerates to a zero-extent rect rather
    /// than inverting.
    pub fn shrunk(&self, margin: i32) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            (self.width - 2 * margin).max(0),
            (self.height - 2 * margin).max(0),
        )
    }

    /// Uniform random interior point.
    pub fn random_point(&self, rng: &mut GenRng) -> Coordinate {
        Coordinate::new(
            self.x + rng.rn2(self.width.max(1) as u32) as i32,
            self.y + rng.rn2(self.height.max(1) as u32) as i32,
        )
    }

    /// Iterate all coordinates inside the rectangle, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let xs = self.x..self.right();
        xs.flat_map(move |x| (self.y..self.bottom()).map(move |y| Coordinate::new(x, y)))
    }
}

/// Direction toward a node's sibling region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    North,
    South,
    East,
    West,
}

impl Adjacency {
    pub const fn opposite(self) -> Adjacency {
        match self {
            Adjacency::North => Adjacency::South,
            Adjacency::South => Adjacency::North,
            Adjacency::East => Adjacency::West,
            Adjacency::West => Adjacency::East,
        }
    }
}

/// One region in the partition tree.
#[derive(Debug, Clone)]
pub struct AreaNode {
    pub rect: Rect,
    /// Recursion depth; the root is 0.
    pub iteration: u32,
    /// Which edge the sibling region lies on. None for the root.
    pub adjacency: Option<Adjacency>,
    pub parent: Option<usize>,
    pub children: Option<(usize, usize)>,
    /// Room carved inside this region, as an index into the level's rooms.
    pub room: Option<usize>,
}

/// Arena of partition nodes.
#[derive(Debug, Clone)]
pub struct AreaArena {
    nodes: Vec<AreaNode>,
}

impl AreaArena {
    /// Create an arena whose root covers the given rectangle.
    pub fn new(rect: Rect) -> Self {
        Self {
            nodes: vec![AreaNode {
                rect,
                iteration: 0,
                adjacency: None,
                parent: None,
                children: None,
                room: None,
            }],
        }
    }

    pub fn node(&self, id: usize) -> &AreaNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: usize) -> &mut AreaNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The other child of this node's parent.
    pub fn sibling(&self, id: usize) -> Option<usize> {
        let parent = self.nodes[id].parent?;
        let (a, b) = self.nodes[parent].children?;
        Some(if a == id { b } else { a })
    }

    /// Ids of all leaf regions.
    pub fn leaves(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].children.is_none())
            .collect()
    }

    /// Randomized split point near the axis midpoint: half the extent plus
    /// or minus up to a quarter, offset direction by fair coin.
    fn split_point(extent: i32, rng: &mut GenRng) -> i32 {
        let mid = extent / 2;
        let offset = rng.rn2((extent / 4 + 1) as u32) as i32;
        let at = if rng.coin() { mid + offset } else { mid - offset };
        at.clamp(1, extent - 1)
    }

    /// Split a leaf with a horizontal cut into top and bottom children.
    /// Returns the two child ids, or None if the region is too thin.
    pub fn split_horizontal(&mut self, id: usize, rng: &mut GenRng) -> Option<(usize, usize)> {
        let node = self.nodes[id].clone();
        if node.children.is_some() || node.rect.height < 2 {
            return None;
        }

        let at = Self::split_point(node.rect.height, rng);
        let top = Rect::new(node.rect.x, node.rect.y, node.rect.width, at);
        let bottom = Rect::new(
            node.rect.x,
            node.rect.y + at,
            node.rect.width,
            node.rect.height - at,
        );
        Some(self.attach(id, node.iteration, top, Adjacency::South, bottom))
    }

    /// Split a leaf with a vertical cut into left and right children.
    pub fn split_vertical(&mut self, id: usize, rng: &mut GenRng) -> Option<(usize, usize)> {
        let node = self.nodes[id].clone();
        if node.children.is_some() || node.rect.width < 2 {
            return None;
        }

        let at = Self::split_point(node.rect.width, rng);
        let left = Rect::new(node.rect.x, node.rect.y, at, node.rect.height);
        let right = Rect::new(
            node.rect.x + at,
            node.rect.y,
            node.rect.width - at,
            node.rect.height,
        );
        Some(self.attach(id, node.iteration, left, Adjacency::East, right))
    }

    fn attach(
        &mut self,
        parent: usize,
        parent_iteration: u32,
        first_rect: Rect,
        first_adjacency: Adjacency,
        second_rect: Rect,
    ) -> (usize, usize) {
        let iteration = parent_iteration + 1;
        let first = self.nodes.len();
        self.nodes.push(AreaNode {
            rect: first_rect,
            iteration,
            adjacency: Some(first_adjacency),
            parent: Some(parent),
            children: None,
            room: None,
        });
        let second = self.nodes.len();
        self.nodes.push(AreaNode {
            rect: second_rect,
            iteration,
            adjacency: Some(first_adjacency.opposite()),
            parent: Some(parent),
            children: None,
            room: None,
        });
        self.nodes[parent].children = Some((first, second));
        (first, second)
    }
}
