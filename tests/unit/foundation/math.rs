use super::*;

#[test]
fn fnv_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_u64(1);
    a.write_u64(2);
    let mut b = Fnv1a64::new_default();
    b.write_u64(2);
    b.write_u64(1);
    assert_ne!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_bytes(&1u64.to_le_bytes());
    c.write_bytes(&2u64.to_le_bytes());
    assert_eq!(a.finish(), c.finish());
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}

#[test]
fn clamp_u8_saturates() {
    assert_eq!(clamp_u8(-3.0), 0);
    assert_eq!(clamp_u8(254.6), 255);
    assert_eq!(clamp_u8(300.0), 255);
    assert_eq!(clamp_u8(f32::NAN), 0);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
}
