use crate::pos::Pos;

pub trait Gridlike<T> {
  fn width(&self) -> usize;
  fn height(&self) -> usize;
  fn in_bounds(&self, pos: Pos) -> bool;

  fn get(&self, pos: Pos) -> Option<&T>;

  fn iter_row<'a, 'b>(&'a self, row: usize) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;
  fn iter_col<'a, 'b>(&'a self, col: usize) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;
}

pub trait MutGridlike<T>: Gridlike<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T>;
}

/// Row-major, fixed-size grid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
  cells: Vec<T>,
  width: usize,
  height: usize,
}

impl<T> Grid<T> {
  fn idx(&self, pos: Pos) -> usize {
    debug_assert!(self.in_bounds(pos));
    pos.col + pos.row * self.width
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
    self.cells.iter_mut()
  }
}

impl<T> Grid<T>
where
  T: Default,
{
  pub fn new(width: usize, height: usize) -> Self {
    Self { cells: (0..width * height).map(|_| T::default()).collect(), width, height }
  }
}

impl<T> Gridlike<T> for Grid<T> {
  fn width(&self) -> usize {
    self.width
  }

  fn height(&self) -> usize {
    self.height
  }

  fn in_bounds(&self, pos: Pos) -> bool {
    pos.row < self.height && pos.col < self.width
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    self.in_bounds(pos).then(|| self.cells.get(self.idx(pos))).flatten()
  }

  fn iter_row<'a, 'b>(&'a self, row: usize) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    (0..self.width()).flat_map(move |col| self.get(Pos { row, col }))
  }

  fn iter_col<'a, 'b>(&'a self, col: usize) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    (0..self.height()).flat_map(move |row| self.get(Pos { row, col }))
  }
}

impl<T> MutGridlike<T> for Grid<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    self
      .in_bounds(pos)
      .then(|| {
        let index = self.idx(pos);
        self.cells.get_mut(index)
      })
      .flatten()
  }
}
