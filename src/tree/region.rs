/// One of the four children of a subdivided region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Fixed order in which children are created and tried during insertion.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }
}

/// An axis-aligned square region of the plane.
///
/// The region covers `[lower, upper)` on both axes. Bounds are stored next to the
/// center so that subdividing reuses the parent's exact edge and center values:
/// neighbouring children share one boundary coordinate and every point of the
/// parent falls into exactly one child, whatever rounding the size carries.
///
/// # Examples
///
/// ```
/// use rs_nbody::tree::Region;
///
/// // A square with center at (2, 2) and side length 4.
/// let region = Region::new(4.0, (2.0, 2.0));
///
/// assert!(region.contains((0.0, 0.0)));   // lower edges are inclusive
/// assert!(region.contains((3.9, 1.0)));
/// assert!(!region.contains((4.0, 1.0)));  // upper edges are exclusive
/// assert!(!region.contains((-0.1, 2.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    center: (f64, f64),
    size: f64,
    lower: (f64, f64),
    upper: (f64, f64),
}

impl Region {
    /// Creates a region of side `size` centered on `center`.
    pub fn new(size: f64, center: (f64, f64)) -> Self {
        let half = size * 0.5;
        Region {
            center,
            size,
            lower: (center.0 - half, center.1 - half),
            upper: (center.0 + half, center.1 + half),
        }
    }

    /// The simulation domain `[0, size)²`.
    pub fn domain(size: f64) -> Self {
        Region {
            center: (size * 0.5, size * 0.5),
            size,
            lower: (0.0, 0.0),
            upper: (size, size),
        }
    }

    fn from_bounds(lower: (f64, f64), upper: (f64, f64), center: (f64, f64), size: f64) -> Self {
        Region { center, size, lower, upper }
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn half_size(&self) -> f64 {
        self.size * 0.5
    }

    pub fn lower(&self) -> (f64, f64) {
        self.lower
    }

    pub fn upper(&self) -> (f64, f64) {
        self.upper
    }

    /// Returns true if `point` lies inside this region.
    ///
    /// The boundary is inclusive on the lower bounds and exclusive on the upper bounds.
    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.lower.0
            && point.0 < self.upper.0
            && point.1 >= self.lower.1
            && point.1 < self.upper.1
    }

    /// Returns the child region for one quadrant.
    ///
    /// North is towards smaller `y`, east towards larger `x`, as in screen coordinates.
    pub fn quadrant(&self, quadrant: Quadrant) -> Region {
        let (cx, cy) = self.center;
        let size = self.size * 0.5;
        let quarter = self.size * 0.25;
        match quadrant {
            Quadrant::NorthWest => Region::from_bounds(
                self.lower,
                (cx, cy),
                (cx - quarter, cy - quarter),
                size,
            ),
            Quadrant::NorthEast => Region::from_bounds(
                (cx, self.lower.1),
                (self.upper.0, cy),
                (cx + quarter, cy - quarter),
                size,
            ),
            Quadrant::SouthWest => Region::from_bounds(
                (self.lower.0, cy),
                (cx, self.upper.1),
                (cx - quarter, cy + quarter),
                size,
            ),
            Quadrant::SouthEast => Region::from_bounds(
                (cx, cy),
                self.upper,
                (cx + quarter, cy + quarter),
                size,
            ),
        }
    }

    /// Subdivides the region into its four quadrants, in `Quadrant::ALL` order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::tree::Region;
    ///
    /// let region = Region::new(2.0, (0.0, 0.0));
    /// let [nw, ne, sw, se] = region.subdivide();
    ///
    /// assert_eq!(nw.center(), (-0.5, -0.5));
    /// assert_eq!(ne.center(), (0.5, -0.5));
    /// assert_eq!(sw.center(), (-0.5, 0.5));
    /// assert_eq!(se.center(), (0.5, 0.5));
    /// assert_eq!(nw.size(), 1.0);
    ///
    /// assert!(nw.contains((-0.25, -0.25)));
    /// assert!(se.contains((0.25, 0.25)));
    /// ```
    pub fn subdivide(&self) -> [Region; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}
