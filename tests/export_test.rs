use std::path::PathBuf;

use image_stamper::{
    DirectoryPicker, DownloadSink, Exporter, StampedImage, StamperError, StamperResult,
};

fn stamped(name: &str, bytes: &[u8]) -> StampedImage {
    StampedImage {
        file_name: name.to_string(),
        mime_type: "image/jpeg",
        bytes: bytes.to_vec(),
        original_name: name.replace("_stamped.jpg", ".png"),
    }
}

fn sample_results() -> Vec<StampedImage> {
    vec![stamped("a_stamped.jpg", b"aaaa"), stamped("b_stamped.jpg", b"bbbb")]
}

/// Names of delivered files in a directory, sorted.
fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn archive_entry_names(dir: &std::path::Path) -> Vec<String> {
    let zip_name = dir_entries(dir)
        .into_iter()
        .find(|n| n.starts_with("stamped-images-") && n.ends_with(".zip"))
        .expect("expected a delivered archive");
    let file = std::fs::File::open(dir.join(zip_name)).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

struct FixedPicker(PathBuf);

impl DirectoryPicker for FixedPicker {
    fn pick_directory(&self) -> StamperResult<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

struct CancellingPicker;

impl DirectoryPicker for CancellingPicker {
    fn pick_directory(&self) -> StamperResult<Option<PathBuf>> {
        Ok(None)
    }
}

struct BrokenPicker;

impl DirectoryPicker for BrokenPicker {
    fn pick_directory(&self) -> StamperResult<Option<PathBuf>> {
        Err(StamperError::Io("picker unavailable".to_string()))
    }
}

#[tokio::test]
async fn specific_directory_write_creates_subfolder() {
    let downloads = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(downloads.path());

    exporter
        .save_to_specific_directory(&sample_results(), target.path())
        .await
        .unwrap();

    let subfolder = target.path().join("stamped-images");
    assert_eq!(dir_entries(&subfolder), vec!["a_stamped.jpg", "b_stamped.jpg"]);
    assert_eq!(std::fs::read(subfolder.join("a_stamped.jpg")).unwrap(), b"aaaa");
    // Nothing fell through to the download path.
    assert!(dir_entries(downloads.path()).is_empty());
}

#[tokio::test]
async fn specific_directory_write_overwrites_same_names() {
    let downloads = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(downloads.path());

    exporter
        .save_to_specific_directory(&[stamped("a_stamped.jpg", b"old")], target.path())
        .await
        .unwrap();
    exporter
        .save_to_specific_directory(&[stamped("a_stamped.jpg", b"new")], target.path())
        .await
        .unwrap();

    let written = std::fs::read(target.path().join("stamped-images/a_stamped.jpg")).unwrap();
    assert_eq!(written, b"new");
}

#[tokio::test]
async fn picker_directory_receives_the_files() {
    let downloads = tempfile::tempdir().unwrap();
    let picked = tempfile::tempdir().unwrap();
    let exporter =
        Exporter::new(downloads.path()).with_picker(FixedPicker(picked.path().to_path_buf()));

    exporter.save_to_directory(&sample_results()).await.unwrap();

    let subfolder = picked.path().join("stamped-images");
    assert_eq!(dir_entries(&subfolder), vec!["a_stamped.jpg", "b_stamped.jpg"]);
    assert!(dir_entries(downloads.path()).is_empty());
}

#[tokio::test]
async fn cancelled_picker_returns_silently() {
    let downloads = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(downloads.path()).with_picker(CancellingPicker);

    exporter.save_to_directory(&sample_results()).await.unwrap();

    // Nothing was exported anywhere.
    assert!(dir_entries(downloads.path()).is_empty());
}

#[tokio::test]
async fn failing_picker_falls_back_to_archive_download() {
    let downloads = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(downloads.path()).with_picker(BrokenPicker);

    exporter.save_to_directory(&sample_results()).await.unwrap();

    assert_eq!(
        archive_entry_names(downloads.path()),
        vec![
            "stamped-images/",
            "stamped-images/a_stamped.jpg",
            "stamped-images/b_stamped.jpg",
        ]
    );
}

#[tokio::test]
async fn unwritable_specific_directory_falls_back_to_download() {
    let downloads = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    // Occupy the subfolder name with a plain file so the write fails.
    std::fs::write(target.path().join("stamped-images"), b"in the way").unwrap();
    let exporter = Exporter::new(downloads.path());

    exporter
        .save_to_specific_directory(&sample_results(), target.path())
        .await
        .unwrap();

    assert!(!archive_entry_names(downloads.path()).is_empty());
}

#[tokio::test]
async fn missing_picker_matches_direct_download_output() {
    let downloads_a = tempfile::tempdir().unwrap();
    let downloads_b = tempfile::tempdir().unwrap();

    Exporter::new(downloads_a.path())
        .save_to_directory(&sample_results())
        .await
        .unwrap();
    Exporter::new(downloads_b.path())
        .download(&sample_results())
        .await
        .unwrap();

    assert_eq!(
        archive_entry_names(downloads_a.path()),
        archive_entry_names(downloads_b.path())
    );
}

#[tokio::test]
async fn empty_results_export_is_a_no_op_for_every_strategy() {
    let downloads = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let exporter =
        Exporter::new(downloads.path()).with_picker(FixedPicker(target.path().to_path_buf()));

    exporter.save_to_directory(&[]).await.unwrap();
    exporter.save_to_specific_directory(&[], target.path()).await.unwrap();
    exporter.download(&[]).await.unwrap();

    assert!(dir_entries(downloads.path()).is_empty());
    assert!(dir_entries(target.path()).is_empty());
}

#[tokio::test]
async fn delivery_stages_are_cleaned_up_on_failure() {
    let downloads = tempfile::tempdir().unwrap();
    // A directory squatting on the final name makes the rename fail.
    std::fs::create_dir(downloads.path().join("photo_stamped.jpg")).unwrap();
    let sink = DownloadSink::new(downloads.path());

    let err = sink.deliver("photo_stamped.jpg", b"data").await;
    assert!(err.is_err());

    let leftovers: Vec<String> = dir_entries(downloads.path())
        .into_iter()
        .filter(|n| n.ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "staged file not released: {leftovers:?}");
}

#[tokio::test]
async fn delivery_overwrites_existing_file() {
    let downloads = tempfile::tempdir().unwrap();
    let sink = DownloadSink::new(downloads.path());

    sink.deliver("a_stamped.jpg", b"old").await.unwrap();
    sink.deliver("a_stamped.jpg", b"new").await.unwrap();

    assert_eq!(
        std::fs::read(downloads.path().join("a_stamped.jpg")).unwrap(),
        b"new"
    );
}
