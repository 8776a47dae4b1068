use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut px = vec![64u8, 0, 32, 128, 9, 9, 9, 0, 10, 20, 30, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 0, 64, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_0_returns_bg_and_255_is_identity() {
    let mut px = vec![200u8, 100, 50, 0, 1, 2, 3, 255];
    flatten_over_bg_in_place(&mut px, [10, 20, 30]);
    assert_eq!(px, vec![10, 20, 30, 255, 1, 2, 3, 255]);
}
