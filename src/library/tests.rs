use super::display::display_from_fields;
use crate::config::TrackDisplayField;
use std::path::Path;

#[test]
fn display_from_fields_can_format_artist_title() {
    let p = Path::new("/tmp/Song.mp3");
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];
    assert_eq!(
        display_from_fields(p, "Song", Some("Artist"), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(p, "Song", Some("  Artist  "), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(p, "Song", None, None, &fields, " - "),
        "Song"
    );
}

#[test]
fn display_from_fields_uses_filename_and_album() {
    let p = Path::new("/music/01 Intro.flac");
    assert_eq!(
        display_from_fields(
            p,
            "Intro",
            None,
            Some("Debut"),
            &[TrackDisplayField::Filename, TrackDisplayField::Album],
            " | ",
        ),
        "01 Intro | Debut"
    );
    // Nothing usable falls back to the title.
    assert_eq!(
        display_from_fields(p, "Intro", None, None, &[TrackDisplayField::Artist], " - "),
        "Intro"
    );
}
