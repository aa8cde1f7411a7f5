//! End-to-end tests for the encrypt → verify → extract workflow and the
//! retry-lockout session.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zipvault_core::ArchiveError;
use zipvault_core::Password;
use zipvault_core::SessionOutcome;
use zipvault_core::VaultOptions;
use zipvault_core::encrypt_to_dir;
use zipvault_core::extract_archive;
use zipvault_core::extractor::try_open;
use zipvault_core::session;
use zipvault_core::verifier::verify_archive;

fn password(secret: &str) -> Password {
    Password::new(secret).unwrap()
}

/// Flips one bit inside the stored ciphertext of the named entry.
///
/// Locates the entry's local file header by its name (local headers
/// precede the central directory, so the first match is the local one),
/// then skips the header, the AES salt, and the password verifier to land
/// inside the ciphertext proper.
fn flip_ciphertext_bit(archive: &Path, entry_name: &str) {
    let mut data = fs::read(archive).unwrap();
    let name = entry_name.as_bytes();
    let name_pos = data
        .windows(name.len())
        .position(|window| window == name)
        .expect("entry name in local header");

    let header_start = name_pos - 30;
    let name_len =
        u16::from_le_bytes([data[header_start + 26], data[header_start + 27]]) as usize;
    let extra_len =
        u16::from_le_bytes([data[header_start + 28], data[header_start + 29]]) as usize;

    // salt (16) + verifier (2), then a few bytes into the ciphertext
    let target = name_pos + name_len + extra_len + 16 + 2 + 4;
    data[target] ^= 0x01;
    fs::write(archive, data).unwrap();
}

#[test]
fn round_trip_single_file_scenario() {
    // Encrypt a 13-byte hello.txt into /out, reopen, extract to /out2.
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    let (archive, report) = encrypt_to_dir(
        &source,
        &out,
        &password("password"),
        &VaultOptions::default(),
    )
    .unwrap();

    assert_eq!(archive, out.join("hello.txt.enc.zip"));
    assert_eq!(report.files_added, 1);
    assert_eq!(report.bytes_read, 13);

    let out2 = temp.path().join("out2");
    extract_archive(&archive, &out2, password("password")).unwrap();

    let restored = fs::read(out2.join("hello.txt")).unwrap();
    assert_eq!(restored, b"Hello, world!");
}

#[test]
fn round_trip_directory_with_empty_subdir_scenario() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::create_dir(root.join("sub")).unwrap();

    let (archive, report) =
        encrypt_to_dir(&root, temp.path(), &password("pw"), &VaultOptions::default()).unwrap();

    assert_eq!(archive, temp.path().join("proj.enc.zip"));
    assert_eq!(report.files_added, 1);
    assert_eq!(report.directories_added, 1);

    // The container carries a marker for the empty directory.
    let file = File::open(&archive).unwrap();
    let container = zip::ZipArchive::new(file).unwrap();
    let names: Vec<_> = container.file_names().collect();
    assert!(names.contains(&"proj/sub/"));
    assert!(names.contains(&"proj/a.txt"));

    let dest = temp.path().join("restore");
    extract_archive(&archive, &dest, password("pw")).unwrap();

    assert_eq!(fs::read_to_string(dest.join("proj/a.txt")).unwrap(), "alpha");
    assert!(dest.join("proj/sub").is_dir());
    assert_eq!(fs::read_dir(dest.join("proj/sub")).unwrap().count(), 0);
}

#[test]
fn round_trip_preserves_nested_structure_and_bytes() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("tree");
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::create_dir_all(root.join("empty/deeper")).unwrap();
    fs::write(root.join("top.bin"), [0u8, 1, 2, 255, 254]).unwrap();
    fs::write(root.join("a/mid.txt"), "mid").unwrap();
    fs::write(root.join("a/b/leaf.txt"), "leaf").unwrap();

    let (archive, _) =
        encrypt_to_dir(&root, temp.path(), &password("pw"), &VaultOptions::default()).unwrap();

    let dest = temp.path().join("restore");
    extract_archive(&archive, &dest, password("pw")).unwrap();

    assert_eq!(
        fs::read(dest.join("tree/top.bin")).unwrap(),
        vec![0u8, 1, 2, 255, 254]
    );
    assert_eq!(fs::read_to_string(dest.join("tree/a/mid.txt")).unwrap(), "mid");
    assert_eq!(
        fs::read_to_string(dest.join("tree/a/b/leaf.txt")).unwrap(),
        "leaf"
    );
    assert!(dest.join("tree/empty/deeper").is_dir());
}

#[test]
fn wrong_password_is_rejected_without_partial_extraction() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let (archive, _) = encrypt_to_dir(
        &source,
        temp.path(),
        &password("password"),
        &VaultOptions::default(),
    )
    .unwrap();

    let out2 = temp.path().join("out2");
    let err = extract_archive(&archive, &out2, password("wrong")).unwrap_err();

    assert!(matches!(err, ArchiveError::WrongPassword));
    assert!(!out2.exists());
    assert!(!out2.join("hello.txt").exists());
}

#[test]
fn tampered_ciphertext_is_detected_with_correct_password() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let (archive, _) = encrypt_to_dir(
        &source,
        temp.path(),
        &password("password"),
        &VaultOptions::default(),
    )
    .unwrap();

    flip_ciphertext_bit(&archive, "hello.txt");

    // The verifier value is untouched, so the password still matches; the
    // damage must surface as corruption, never as silently-wrong output.
    let verify_err = verify_archive(&archive, &password("password")).unwrap_err();
    assert!(verify_err.is_integrity_failure());

    let dest = temp.path().join("restore");
    let open = try_open(&archive, password("password")).unwrap();
    let extract_err = open.extract(&dest).unwrap_err();
    assert!(extract_err.is_integrity_failure());
}

#[test]
fn path_escape_is_rejected_and_writes_nothing_outside() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("evil.enc.zip");

    let file = File::create(&archive).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .with_aes_encryption(zip::AesMode::Aes256, "pw");
    writer.start_file("../../evil.txt", options).unwrap();
    writer.write_all(b"malicious payload").unwrap();
    writer.finish().unwrap();

    let dest = temp.path().join("sub1").join("sub2");
    let open = try_open(&archive, password("pw")).unwrap();
    let err = open.extract(&dest).unwrap_err();

    assert!(matches!(err, ArchiveError::PathTraversal { .. }));
    assert!(err.is_integrity_failure());
    // dest/../../evil.txt resolves here; nothing may exist there.
    assert!(!temp.path().join("evil.txt").exists());
}

#[test]
fn lockout_after_limit_quarantines_archive() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let quarantine = temp.path().join("quarantine");
    let options = VaultOptions::default().with_quarantine_dir(&quarantine);

    let (archive, _) =
        encrypt_to_dir(&source, temp.path(), &password("password"), &options).unwrap();

    let dest = temp.path().join("restore");
    let mut prompts = 0u8;
    let outcome = session::run(&archive, &dest, &options, |_session| {
        prompts += 1;
        Some(password("wrong"))
    })
    .unwrap();

    assert_eq!(prompts, 5);
    match outcome {
        SessionOutcome::Locked { quarantined_to } => {
            assert_eq!(quarantined_to, quarantine.join("hello.txt.enc.zip"));
            assert!(quarantined_to.exists());
        }
        other => panic!("expected lockout, got {other:?}"),
    }
    // Moved, not copied: the original path is gone.
    assert!(!archive.exists());
    assert!(!dest.exists());
}

#[test]
fn correct_password_on_final_attempt_extracts_without_quarantine() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let quarantine = temp.path().join("quarantine");
    let options = VaultOptions::default().with_quarantine_dir(&quarantine);

    let (archive, _) =
        encrypt_to_dir(&source, temp.path(), &password("password"), &options).unwrap();

    let dest = temp.path().join("restore");
    let mut prompts = 0u8;
    let outcome = session::run(&archive, &dest, &options, |session| {
        prompts += 1;
        // Four wrong attempts, then the correct password.
        if session.attempts() < 4 {
            Some(password("wrong"))
        } else {
            Some(password("password"))
        }
    })
    .unwrap();

    assert_eq!(prompts, 5);
    assert!(matches!(outcome, SessionOutcome::Extracted(_)));
    assert!(archive.exists());
    assert!(!quarantine.exists());
    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).unwrap(),
        "Hello, world!"
    );
}

#[test]
fn cancelled_session_leaves_archive_in_place() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let options = VaultOptions::default().with_quarantine_dir(temp.path().join("quarantine"));
    let (archive, _) =
        encrypt_to_dir(&source, temp.path(), &password("password"), &options).unwrap();

    let dest = temp.path().join("restore");
    let mut prompts = 0u8;
    let outcome = session::run(&archive, &dest, &options, |_session| {
        prompts += 1;
        if prompts <= 2 {
            Some(password("wrong"))
        } else {
            None
        }
    })
    .unwrap();

    match outcome {
        SessionOutcome::Cancelled { attempts_made } => assert_eq!(attempts_made, 2),
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(archive.exists());
}

#[test]
fn corrupt_archive_aborts_session_without_counting_attempts() {
    let temp = TempDir::new().unwrap();
    let bogus = temp.path().join("broken.enc.zip");
    fs::write(&bogus, "not a zip container at all").unwrap();

    let quarantine = temp.path().join("quarantine");
    let options = VaultOptions::default().with_quarantine_dir(&quarantine);

    let dest = temp.path().join("restore");
    let mut prompts = 0u8;
    let err = session::run(&bogus, &dest, &options, |_session| {
        prompts += 1;
        Some(password("anything"))
    })
    .unwrap_err();

    assert!(err.is_integrity_failure());
    // One prompt, no retries, no quarantine.
    assert_eq!(prompts, 1);
    assert!(bogus.exists());
    assert!(!quarantine.exists());
}

#[test]
fn archive_carries_winzip_aes_extra_field() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let (archive, _) = encrypt_to_dir(
        &source,
        temp.path(),
        &password("password"),
        &VaultOptions::default(),
    )
    .unwrap();

    // 0x9901 extra-field id with the "AE" vendor marker is what third-party
    // tools key on to recognize the convention. Field layout:
    // id(2) size(2) version(2) vendor(2) strength(1) method(2).
    let data = fs::read(&archive).unwrap();
    let has_aes_extra = data
        .windows(8)
        .any(|window| window[0] == 0x01 && window[1] == 0x99 && &window[6..8] == b"AE");
    assert!(has_aes_extra, "archive should carry the WinZip-AES extra field");
}

#[test]
fn source_tree_is_untouched_by_all_core_operations() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "alpha").unwrap();

    let (archive, _) =
        encrypt_to_dir(&root, temp.path(), &password("pw"), &VaultOptions::default()).unwrap();
    verify_archive(&archive, &password("pw")).unwrap();
    let dest = temp.path().join("restore");
    extract_archive(&archive, &dest, password("pw")).unwrap();

    assert!(root.join("a.txt").exists());
    assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "alpha");
}

#[test]
fn archive_name_collision_overwrites_cleanly() {
    // Writing the same source twice to the same output directory replaces
    // the previous archive rather than appending to it.
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "first").unwrap();

    let options = VaultOptions::default();
    let (archive_a, _) = encrypt_to_dir(&source, temp.path(), &password("pw"), &options).unwrap();

    fs::write(&source, "second contents").unwrap();
    let (archive_b, _) = encrypt_to_dir(&source, temp.path(), &password("pw"), &options).unwrap();
    assert_eq!(archive_a, archive_b);

    let dest = temp.path().join("restore");
    extract_archive(&archive_b, &dest, password("pw")).unwrap();
    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).unwrap(),
        "second contents"
    );
}

#[test]
fn quarantined_archive_still_opens_with_correct_password() {
    // Quarantine relocates; it does not damage or conceal the archive.
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("hello.txt");
    fs::write(&source, "Hello, world!").unwrap();

    let quarantine = temp.path().join("quarantine");
    let options = VaultOptions::default().with_quarantine_dir(&quarantine);
    let (archive, _) =
        encrypt_to_dir(&source, temp.path(), &password("password"), &options).unwrap();

    let dest = temp.path().join("restore");
    let outcome = session::run(&archive, &dest, &options, |_s| Some(password("wrong"))).unwrap();
    let quarantined_to: PathBuf = match outcome {
        SessionOutcome::Locked { quarantined_to } => quarantined_to,
        other => panic!("expected lockout, got {other:?}"),
    };

    extract_archive(&quarantined_to, &dest, password("password")).unwrap();
    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).unwrap(),
        "Hello, world!"
    );
}
