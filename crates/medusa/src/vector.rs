//! Fixed-dimension coordinate arithmetic.
//!
//! `Vector<D>` is the single numeric tuple type shared by positions, force
//! accumulators and gradients. The dimension is a compile-time parameter so
//! 2D and 3D layouts share every code path.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize>(pub [f64; D]);

// Serialized as a bare coordinate tuple `[x, y, ...]`; the derive cannot be
// used because serde has no `Serialize` for const-generic arrays.
impl<const D: usize> Serialize for Vector<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(D)?;
        for coord in &self.0 {
            tup.serialize_element(coord)?;
        }
        tup.end()
    }
}

impl<const D: usize> Vector<D> {
    pub fn zero() -> Self {
        Self([0.0; D])
    }

    pub fn dot(&self, r: &Self) -> f64 {
        let mut s = 0.0;
        for dim in 0..D {
            s += self.0[dim] * r.0[dim];
        }
        s
    }

    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn dist(&self, r: &Self) -> f64 {
        (*self - *r).norm()
    }

    /// Unit vector in the same direction. The zero vector maps to itself so
    /// degenerate force contributions stay finite.
    pub fn unit(&self) -> Self {
        let n = self.norm();
        if n == 0.0 { *self } else { *self / n }
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, dim: usize) -> &f64 {
        &self.0[dim]
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, dim: usize) -> &mut f64 {
        &mut self.0[dim]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(mut self, r: Self) -> Self {
        self += r;
        self
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(mut self, r: Self) -> Self {
        self -= r;
        self
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for dim in 0..D {
            self.0[dim] = -self.0[dim];
        }
        self
    }
}

impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, r: Self) {
        for dim in 0..D {
            self.0[dim] += r.0[dim];
        }
    }
}

impl<const D: usize> SubAssign for Vector<D> {
    fn sub_assign(&mut self, r: Self) {
        for dim in 0..D {
            self.0[dim] -= r.0[dim];
        }
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(mut self, r: f64) -> Self {
        for dim in 0..D {
            self.0[dim] *= r;
        }
        self
    }
}

impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;

    fn div(mut self, r: f64) -> Self {
        for dim in 0..D {
            self.0[dim] /= r;
        }
        self
    }
}
