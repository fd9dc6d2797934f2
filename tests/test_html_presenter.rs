mod helpers;

use anyhow::Result;
use blocknotes::application::NoteRepository;
use blocknotes::ports::HtmlPresenter;
use helpers::{test_notes, TestDatabase};

#[test]
fn given_note_with_markup_in_text_when_rendering_then_escapes_it() -> Result<()> {
    // Arrange
    let database = TestDatabase::seeded()?;
    let mut repo = database.open_repository()?;
    let note = repo.get_by_id(test_notes::MEETING)?.expect("seeded note");

    // Act
    let html = HtmlPresenter::new().render(&note);

    // Assert
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Meeting &lt;notes&gt;"));
    assert!(html.contains("Agenda &amp; goals"));
    assert!(html.contains(r#"src="file:///data/audio_notes/standup.m4a""#));
    Ok(())
}

#[test]
fn given_embedded_audio_when_rendering_then_uses_data_uri() -> Result<()> {
    // Arrange
    let database = TestDatabase::seeded()?;
    let mut repo = database.open_repository()?;
    let note = repo.get_by_id(test_notes::VOICE_MEMO)?.expect("seeded note");

    // Act
    let html = HtmlPresenter::new().render(&note);

    // Assert
    assert!(html.contains("data:audio/mpeg;base64,SUQzBAAAAAAA"));
    assert!(html.contains("memo.mp3"));
    Ok(())
}

#[test]
fn given_undecodable_image_when_rendering_then_shows_placeholder() -> Result<()> {
    // Arrange
    let database = TestDatabase::seeded()?;
    let mut repo = database.open_repository()?;
    let note = repo.get_by_id(test_notes::RECIPE)?.expect("seeded note");

    // Act
    let html = HtmlPresenter::new().render(&note);

    // Assert
    assert!(html.contains("Image unavailable"));
    assert!(!html.contains("<img"));
    assert!(html.contains("Pancakes"));
    Ok(())
}

#[test]
fn given_imported_image_when_rendering_then_embeds_jpeg_data_uri() -> Result<()> {
    // Arrange
    let database = TestDatabase::new()?;
    let photo = database.write_png("photo.png", 40, 20)?;
    let block = database.importer().import_image(&photo)?;
    let mut note = blocknotes::domain::Note::new(
        "Photo",
        blocknotes::domain::content::serialize(&[block]),
    );
    note.id = 1;

    // Act
    let html = HtmlPresenter::new().render(&note);

    // Assert
    assert!(html.contains(r#"src="data:image/jpeg;base64,"#));
    assert!(html.contains(r#"width="40" height="20""#));
    Ok(())
}
