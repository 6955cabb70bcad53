// THEORY:
// The `Point` module is the most fundamental unit of the voting engine. A `Point`
// is a "dumb" data container: one piece of edge evidence in image pixel space,
// produced once by an external extraction step and never mutated afterwards.
//
// Key architectural principles:
// 1.  **Pixel Space**: `x` is the column and `y` is the row, both real-valued so that
//     sub-pixel detectors can feed the engine as well as thresholded rasters.
// 2.  **Immutability**: Points are `Copy` and carry no behavior beyond construction.
//     How a point relates to a curve is the business of `CurveFamily`.
// 3.  **Stable Order**: Collections of points are plain ordered slices. The order has
//     no numerical meaning, but it fixes the floating-point accumulation order.

pub mod point {
    pub type Coordinate = f64;

    /// A single piece of edge evidence in image pixel coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Point {
        /// The column coordinate in pixels.
        pub x: Coordinate,
        /// The row coordinate in pixels.
        pub y: Coordinate,
    }

    impl Point {
        pub fn new(x: Coordinate, y: Coordinate) -> Self {
            Self { x, y }
        }
    }

    impl From<(Coordinate, Coordinate)> for Point {
        fn from((x, y): (Coordinate, Coordinate)) -> Self {
            Point::new(x, y)
        }
    }

    impl From<(u32, u32)> for Point {
        fn from((x, y): (u32, u32)) -> Self {
            Point::new(x as Coordinate, y as Coordinate)
        }
    }
}
