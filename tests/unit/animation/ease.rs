use super::*;

#[test]
fn in_out_quad_endpoints_and_midpoint() {
    assert_eq!(in_out_quad(0.0), 0.0);
    assert!((in_out_quad(1.0) - 1.0).abs() < 1e-12);
    assert!((in_out_quad(0.5) - 0.5).abs() < 1e-12);
    assert_eq!(in_out_quad(-3.0), 0.0);
    assert!((in_out_quad(7.0) - 1.0).abs() < 1e-12);
    assert!(in_out_quad(0.25) < 0.25);
}

#[test]
fn envelope_peaks_in_the_middle() {
    assert_eq!(pulse_envelope(0.0), 0.0);
    assert!((pulse_envelope(0.5) - 1.0).abs() < 1e-12);
    assert!(pulse_envelope(1.0).abs() < 1e-12);
    assert!((pulse_envelope(0.25) - pulse_envelope(0.75)).abs() < 1e-12);
    assert_eq!(pulse_envelope(f64::NAN), 0.0);
}
