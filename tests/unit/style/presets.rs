use super::*;

#[test]
fn lookup_is_case_insensitive() {
    let p = PresetSize::by_id(" Reaction ").unwrap();
    assert_eq!(p.canvas(), Canvas::new(128, 128));
    assert!(PresetSize::by_id("poster").is_none());
}

#[test]
fn ids_are_unique() {
    let all = PresetSize::all();
    for (i, a) in all.iter().enumerate() {
        assert!(all[i + 1..].iter().all(|b| b.id != a.id));
        assert!(a.width > 0 && a.height > 0);
    }
}
