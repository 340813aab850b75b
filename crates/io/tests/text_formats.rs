use chrono::NaiveDate;
use ndarray::array;

use omi_eof::{EofCollection, EofPair};
use omi_io::{
    IoError, load_all_eofs_from_directory, load_pcs_from_txt_file,
    load_single_eofs_from_txt_file, save_all_eofs_to_dir, save_eofs_to_txt_file,
    save_pcs_to_txt_file,
};
use omi_pc::PcSeries;

fn sample_pair() -> EofPair {
    EofPair::new(
        array![-10.0, 0.0, 10.0],
        array![0.0, 5.0],
        array![0.00022178496, -0.0023467445, 0.015404793, 0.5, -0.25, 0.013897266].into_dyn(),
        array![0.0042107304, 0.015404793, -0.125, 0.0625, 0.5, 0.012487547].into_dyn(),
    )
    .unwrap()
}

#[test]
fn eof_txt_roundtrip_within_truncation_tolerance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let pair = sample_pair();
    save_eofs_to_txt_file(&pair, &path).unwrap();
    let reloaded = load_single_eofs_from_txt_file(&path).unwrap();

    // The text format truncates at the 7th decimal.
    assert!(reloaded.close_to(&pair, 1e-7));
    assert_eq!(reloaded.lat(), pair.lat());
    assert_eq!(reloaded.long(), pair.long());
}

#[test]
fn eof_txt_sample_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    save_eofs_to_txt_file(&sample_pair(), &path).unwrap();
    let reloaded = load_single_eofs_from_txt_file(&path).unwrap();

    assert!((reloaded.eof1_vector()[0] - 0.00022178496).abs() < 1e-7);
    assert!((reloaded.eof2_vector()[0] - 0.0042107304).abs() < 1e-7);
    assert!((reloaded.eof1_vector()[5] - 0.013897266).abs() < 1e-7);
    assert!((reloaded.eof2_vector()[5] - 0.012487547).abs() < 1e-7);
}

fn sample_collection() -> EofCollection {
    let pairs = (1..=366)
        .map(|doy| {
            let scale = doy as f64 / 1000.0;
            EofPair::new(
                array![-10.0, 0.0, 10.0],
                array![0.0, 5.0],
                (array![0.1, 0.2, 0.3, 0.4, 0.5, 0.6] * scale).into_dyn(),
                (array![0.6, 0.5, 0.4, 0.3, 0.2, 0.1] * scale).into_dyn(),
            )
            .unwrap()
        })
        .collect();
    EofCollection::new(pairs, false).unwrap()
}

#[test]
fn eof_dir_save_requires_directory_unless_created() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not_there");

    let err = save_all_eofs_to_dir(&sample_collection(), &missing, false).unwrap_err();
    assert!(matches!(err, IoError::DirectoryNotFound { .. }));

    // With create_dir the same call succeeds.
    save_all_eofs_to_dir(&sample_collection(), &missing, true).unwrap();
    assert!(missing.join("eof001.txt").exists());
    assert!(missing.join("eof366.txt").exists());
}

#[test]
fn eof_dir_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("eofs");

    let collection = sample_collection();
    save_all_eofs_to_dir(&collection, &target, true).unwrap();
    let reloaded = load_all_eofs_from_directory(&target).unwrap();

    assert_eq!(reloaded.len(), 366);
    assert!(reloaded.close_to(&collection, 1e-7));
}

#[test]
fn eof_dir_load_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_all_eofs_from_directory(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, IoError::DirectoryNotFound { .. }));
}

#[test]
fn pc_txt_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pcs.txt");

    let series = PcSeries::new(
        (0..10)
            .map(|i| NaiveDate::from_ymd_opt(1979, 1, 1 + i).unwrap())
            .collect(),
        (0..10).map(|i| i as f64 * 0.125 - 0.5).collect(),
        (0..10).map(|i| 1.0 - i as f64 * 0.0625).collect(),
    )
    .unwrap();

    save_pcs_to_txt_file(&series, &path).unwrap();
    let reloaded = load_pcs_from_txt_file(&path).unwrap();

    assert_eq!(reloaded.time(), series.time());
    for (a, b) in series.pc1().iter().zip(reloaded.pc1()) {
        assert!((a - b).abs() < 1e-5, "pc1 roundtrip: {a} vs {b}");
    }
    for (a, b) in series.pc2().iter().zip(reloaded.pc2()) {
        assert!((a - b).abs() < 1e-5, "pc2 roundtrip: {a} vs {b}");
    }
}
