use nalgebra::Matrix2;
use num_complex::Complex64;
use polarcore::{complex::Complex, matrix::Matrix2x2, vector::Vector3};

const TOL: f64 = 1e-12;

fn sample_a() -> Matrix2x2 {
    Matrix2x2::new(
        Complex::new(0.5, -1.0),
        Complex::new(2.0, 0.25),
        Complex::new(-1.5, 0.0),
        Complex::new(0.75, 1.25),
    )
}

fn sample_b() -> Matrix2x2 {
    Matrix2x2::wave_plate(0.8, 0.3) * Matrix2x2::linear_polarizer(1.1)
        + Matrix2x2::scaled_identity(Complex::new(0.1, 0.2))
}

#[test]
fn product_matches_nalgebra() {
    let (a, b) = (sample_a(), sample_b());
    let na: Matrix2<Complex64> = a.into();
    let nb: Matrix2<Complex64> = b.into();
    let expected = Matrix2x2::from(na * nb);
    assert!((a * b).approx_eq_within(&expected, TOL));
}

#[test]
fn determinant_and_trace_match_nalgebra() {
    let a = sample_a();
    let na: Matrix2<Complex64> = a.into();
    assert!(a.determinant().approx_eq_within(&na.determinant().into(), TOL));
    assert!(a.trace().approx_eq_within(&na.trace().into(), TOL));
}

#[test]
fn inverse_matches_nalgebra() {
    let a = sample_a();
    let na: Matrix2<Complex64> = a.into();
    let expected = Matrix2x2::from(na.try_inverse().unwrap());
    assert!(a.inverse().unwrap().approx_eq_within(&expected, TOL));
}

#[test]
fn adjoint_matches_nalgebra() {
    let b = sample_b();
    let nb: Matrix2<Complex64> = b.into();
    assert!(b.adjoint().approx_eq_within(&Matrix2x2::from(nb.adjoint()), TOL));
}

#[test]
fn cross_product_matches_nalgebra() {
    let a = Vector3::new(0.3, -1.2, 2.0);
    let b = Vector3::new(-0.7, 0.4, 1.5);
    let na: nalgebra::Vector3<f64> = a.into();
    let nb: nalgebra::Vector3<f64> = b.into();
    assert!(a.cross(&b).approx_eq_within(&na.cross(&nb).into(), TOL));
    assert!((a.angle_to(&b) - na.angle(&nb)).abs() < TOL);
}

#[test]
fn serde_json_boundary() {
    let m = sample_a();
    let json = serde_json::to_string(&m).unwrap();
    let back: Matrix2x2 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);

    let z: Complex = serde_json::from_str(r#"{"real": 1.0, "imag": -2.0}"#).unwrap();
    assert_eq!(z, Complex::new(1.0, -2.0));
}
