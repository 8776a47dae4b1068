use super::*;

#[test]
fn missing_file_is_a_font_error() {
    let err = FontFace::from_path(Path::new("/definitely/not/here.ttf")).unwrap_err();
    assert!(matches!(err, KinetypeError::Font(_)));
}

#[test]
fn empty_file_is_rejected() {
    let dir = std::env::temp_dir().join(format!("kinetype_font_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let p = dir.join("empty.ttf");
    std::fs::write(&p, b"").unwrap();
    let err = FontFace::resolve(Some(&p), &[]).unwrap_err();
    assert!(err.to_string().contains("empty"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn explicit_path_uses_file_stem_as_family() {
    let dir = std::env::temp_dir().join(format!("kinetype_font_stem_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let p = dir.join("Display-Black.otf");
    std::fs::write(&p, b"not really a font").unwrap();
    let face = FontFace::from_path(&p).unwrap();
    assert_eq!(face.family, "Display-Black");
    assert_eq!(face.index, 0);
    let _ = std::fs::remove_dir_all(&dir);
}


fn installed_fonts() -> usvg::fontdb::Database {
    let db = build_fontdb(&[]);
    assert!(db.len() > 0, "at least one installed font face is required");
    db
}

#[test]
fn empty_database_reports_a_single_font_error() {
    let err = query_fallback_chain(&usvg::fontdb::Database::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "font error: no usable font face found on this system"
    );
}

#[test]
fn cached_font_errors_are_not_wrapped_twice() {
    let msg = font_message(KinetypeError::font("no face"));
    assert_eq!(KinetypeError::font(msg).to_string(), "font error: no face");
}

#[test]
fn unresolvable_sans_serif_alias_still_finds_a_face() {
    let mut db = installed_fonts();
    db.set_sans_serif_family("Kinetype Missing Family");
    let face = query_fallback_chain(&db).unwrap();
    assert!(!face.data.is_empty());
    assert!(!face.family.is_empty());
}

#[test]
fn any_face_fallback_prefers_the_display_weight() {
    let db = installed_fonts();
    let id = nearest_display_face(&db).unwrap();
    let picked = db.face(id).unwrap();
    let distance = |f: &usvg::fontdb::FaceInfo| f.weight.0.abs_diff(DISPLAY_WEIGHT);
    let best = db
        .faces()
        .filter(|f| f.style == picked.style && f.monospaced == picked.monospaced)
        .map(distance)
        .min()
        .unwrap();
    assert_eq!(distance(picked), best);
}

#[test]
fn system_face_resolves_when_fonts_are_installed() {
    installed_fonts();
    let face = FontFace::system().unwrap();
    assert!(!face.data.is_empty());
}
