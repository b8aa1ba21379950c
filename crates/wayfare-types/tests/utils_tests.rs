use wayfare_types::*;

#[test]
fn test_is_blank() {
    assert!(is_blank(""));
    assert!(is_blank("   \n\t"));
    assert!(!is_blank(" Great trip! "));
}

#[test]
fn test_media_blob_path() {
    let thailand = CountryId::from("thailand");
    assert_eq!(
        media_blob_path(&thailand, "beach.jpg").as_deref(),
        Some("media/thailand/beach.jpg")
    );
    // Directory components of the picked file never leak into the blob path
    assert_eq!(
        media_blob_path(&thailand, "/home/me/Pictures/beach.jpg").as_deref(),
        Some("media/thailand/beach.jpg")
    );
    assert_eq!(
        media_blob_path(&thailand, "C:\\photos\\temple.png").as_deref(),
        Some("media/thailand/temple.png")
    );
}

#[test]
fn test_media_blob_path_rejects_names_that_escape_the_folder() {
    let japan = CountryId::from("japan");
    for name in ["..", ".", "", "  ", "photos/..", "photos/", "C:\\photos\\.."] {
        assert_eq!(media_blob_path(&japan, name), None, "name {:?}", name);
    }
    assert_eq!(
        media_blob_path(&japan, "..hidden.png").as_deref(),
        Some("media/japan/..hidden.png")
    );
}

#[test]
fn test_same_name_same_path() {
    let france = CountryId::from("france");
    assert_eq!(
        media_blob_path(&france, "a/eiffel.jpg"),
        media_blob_path(&france, "b/eiffel.jpg")
    );
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("this is a very long string", 7), "this is...");
}
