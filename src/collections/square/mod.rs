mod coord;

pub use self::coord::Coord;

use std::ops::{Deref, Index, IndexMut};

/// A container of elements represented in a square grid
#[derive(Clone, Debug, PartialEq)]
pub struct Square<T> {
    width: usize,
    elements: Vec<T>,
}

impl<T> Square<T> {
    /// Create a new `Square` of a specified width and fill with a specified value
    pub fn with_width_and_value(width: usize, val: T) -> Square<T>
    where
        T: Clone,
    {
        Square {
            width,
            elements: vec![val; width.pow(2)],
        }
    }

    /// Create a new `Square` with each element computed from its `Coord`
    pub fn from_fn(width: usize, mut f: impl FnMut(Coord) -> T) -> Square<T> {
        let elements = (0..width.pow(2))
            .map(|i| f(Coord::new(i / width, i % width)))
            .collect();
        Square { width, elements }
    }

    pub(crate) fn from_elements(width: usize, elements: Vec<T>) -> Square<T> {
        debug_assert_eq!(width.pow(2), elements.len());
        Square { width, elements }
    }

    /// Returns the width (and height) of the grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns an iterator over the rows of the square
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.width)
    }

    /// Returns an iterator over every element, paired with its `Coord`, in row-major order
    pub fn iter_coord(&self) -> impl Iterator<Item = (Coord, &T)> {
        let width = self.width;
        self.elements
            .iter()
            .enumerate()
            .map(move |(i, e)| (Coord::new(i / width, i % width), e))
    }

    /// Transforms every element, keeping the layout
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Square<U> {
        Square {
            width: self.width,
            elements: self.elements.iter().map(f).collect(),
        }
    }
}

impl<T> Deref for Square<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> Index<Coord> for Square<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.elements[coord.as_index(self.width)]
    }
}

impl<T> IndexMut<Coord> for Square<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        &mut self.elements[coord.as_index(self.width)]
    }
}
