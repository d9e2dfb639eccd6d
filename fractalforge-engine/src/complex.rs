/// Complex number over f64, sized for per-pixel kernel math.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }

    pub fn sub(self, other: Complex) -> Complex {
        Complex::new(self.re - other.re, self.im - other.im)
    }

    pub fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    /// Division with the denominator magnitude floored at 1e-12, matching
    /// the kernel's guard against division blow-up near critical points.
    pub fn div(self, other: Complex) -> Complex {
        let denom = (other.re * other.re + other.im * other.im).max(1e-12);
        Complex::new(
            (self.re * other.re + self.im * other.im) / denom,
            (self.im * other.re - self.re * other.im) / denom,
        )
    }

    pub fn scale(self, factor: f64) -> Complex {
        Complex::new(self.re * factor, self.im * factor)
    }

    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn abs(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Rotate by an angle in radians.
    pub fn rotate(self, angle: f64) -> Complex {
        let (sin_a, cos_a) = angle.sin_cos();
        Complex::new(
            self.re * cos_a - self.im * sin_a,
            self.re * sin_a + self.im * cos_a,
        )
    }

    pub fn sin(self) -> Complex {
        Complex::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    pub fn cos(self) -> Complex {
        Complex::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    /// Unit complex number at `angle` radians.
    pub fn from_angle(angle: f64) -> Complex {
        let (sin_a, cos_a) = angle.sin_cos();
        Complex::new(cos_a, sin_a)
    }
}
