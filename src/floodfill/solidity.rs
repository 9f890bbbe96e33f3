//! The [Solidity] trait is the only view the engine has of the world: a
//! read-only "is this tile impassable?" query over a bounded tile grid.
//!
//! [SolidityGrid] is a dense implementation of it which can be built by hand,
//! from rows of text, or (behind the `ron`/`csv` features) from disk. A
//! SolidityGrid of `5x3` might look like:
//!
//! ```text
//!  _______________
//! |__|__|##|__|__|
//! |__|__|##|__|__|
//! |__|__|__|__|__|
//! ```
//!
//! Anything outside the grid is reported as solid so an expansion or
//! collision check can never wander off the map.
//!

use bevy::prelude::*;

/// Answers whether a tile is impassable
pub trait Solidity {
	/// The `(width, height)` of the grid in tiles
	fn get_size(&self) -> UVec2;
	/// Whether the tile at `(x, y)` is impassable, tiles outside of the grid
	/// must report `true`
	fn is_solid(&self, x: i32, y: i32) -> bool;
}

/// Dense row-major grid of impassable flags
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(try_from = "SolidityGridData")
)]
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct SolidityGrid {
	/// Number of tiles along `x`
	width: u32,
	/// Number of tiles along `y`
	height: u32,
	/// Row-major flags, `true` being impassable
	cells: Vec<bool>,
}

impl SolidityGrid {
	/// Create a new [SolidityGrid] where every tile is passable
	pub fn new(width: u32, height: u32) -> Self {
		if width == 0 || height == 0 {
			panic!(
				"SolidityGrid dimensions `({}, {})` must both be greater than zero",
				width, height
			);
		}
		SolidityGrid {
			width,
			height,
			cells: vec![false; (width * height) as usize],
		}
	}
	/// Build a grid from rows of text where `#` marks an impassable tile and
	/// anything else is passable. All rows must be the same length
	pub fn from_rows(rows: &[&str]) -> Self {
		let height = rows.len() as u32;
		let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;
		let mut grid = SolidityGrid::new(width, height);
		for (y, row) in rows.iter().enumerate() {
			if row.chars().count() as u32 != width {
				panic!(
					"Row {} is {} tiles long, expected {}",
					y,
					row.chars().count(),
					width
				);
			}
			for (x, c) in row.chars().enumerate() {
				grid.set_solid(x as i32, y as i32, c == '#');
			}
		}
		grid
	}
	/// Number of tiles along `x`
	pub fn get_width(&self) -> u32 {
		self.width
	}
	/// Number of tiles along `y`
	pub fn get_height(&self) -> u32 {
		self.height
	}
	/// Index of a tile within `cells`, [None] when out of bounds
	fn index(&self, x: i32, y: i32) -> Option<usize> {
		if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
			None
		} else {
			Some(y as usize * self.width as usize + x as usize)
		}
	}
	/// Mark a tile as impassable or passable. Out of bounds requests are
	/// ignored
	pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) {
		if let Some(i) = self.index(x, y) {
			self.cells[i] = solid;
		} else {
			error!(
				"Cannot set solidity of tile ({}, {}), grid is {}x{}",
				x, y, self.width, self.height
			);
		}
	}
	/// Mark every tile inside `region` (max exclusive) as impassable
	pub fn fill_solid(&mut self, region: IRect) {
		for y in region.min.y..region.max.y {
			for x in region.min.x..region.max.x {
				self.set_solid(x, y, true);
			}
		}
	}
	/// From a `ron` document generate the [SolidityGrid]
	#[cfg(feature = "ron")]
	pub fn from_ron<R: std::io::Read>(reader: R) -> Result<Self, ron::error::SpannedError> {
		ron::de::from_reader(reader)
	}
	/// From a headerless `csv` document generate the [SolidityGrid]. Values
	/// follow the cost field convention of `255` being impassable, any other
	/// `u8` is passable
	#[cfg(feature = "csv")]
	pub fn from_csv<R: std::io::Read>(reader: R) -> Result<Self, csv::Error> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_reader(reader);
		let mut rows: Vec<Vec<bool>> = Vec::new();
		for record in rdr.deserialize() {
			let costs: Vec<u8> = record?;
			rows.push(costs.iter().map(|c| *c == 255).collect());
		}
		let height = rows.len() as u32;
		let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
		let cells = rows.into_iter().flatten().collect();
		SolidityGrid::try_from(SolidityGridData {
			width,
			height,
			cells,
		})
		.map_err(|e| {
			error!("Rejected solidity csv: {}", e);
			csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
		})
	}
}

impl Solidity for SolidityGrid {
	fn get_size(&self) -> UVec2 {
		UVec2::new(self.width, self.height)
	}
	fn is_solid(&self, x: i32, y: i32) -> bool {
		self.index(x, y).is_none_or(|i| self.cells[i])
	}
}

/// Unvalidated shape of a [SolidityGrid] as it appears on disk
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SolidityGridData {
	/// Number of tiles along `x`
	width: u32,
	/// Number of tiles along `y`
	height: u32,
	/// Row-major flags, `true` being impassable
	cells: Vec<bool>,
}

impl TryFrom<SolidityGridData> for SolidityGrid {
	type Error = String;
	fn try_from(data: SolidityGridData) -> Result<Self, Self::Error> {
		if data.width == 0 || data.height == 0 {
			return Err(format!(
				"SolidityGrid dimensions `({}, {})` must both be greater than zero",
				data.width, data.height
			));
		}
		let expected = data.width as usize * data.height as usize;
		if data.cells.len() != expected {
			return Err(format!(
				"SolidityGrid of {}x{} needs {} cells, found {}",
				data.width,
				data.height,
				expected,
				data.cells.len()
			));
		}
		Ok(SolidityGrid {
			width: data.width,
			height: data.height,
			cells: data.cells,
		})
	}
}
