use std::fs;
use std::path::{Path, PathBuf};

use tei2tables::audio::WavFolder;
use tei2tables::config::{Config, Granularity};
use tei2tables::pipeline::pipeline::Pipeline;
use tei2tables::pipeline::{Corpus, CorpusSummary};

const PERSONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<listPerson xmlns="http://www.tei-c.org/ns/1.0">
  <person xml:id="1007" sex="m">
    <birth>1920</birth>
    <occupation>Landwirt</occupation>
  </person>
  <person xml:id="1008" sex="f">
    <birth><unclear>1915</unclear></birth>
  </person>
</listPerson>"#;

const METADATA: &str = "DocID\tSpeakerID\tDialect area\tYear of birth\tSex\tProfession\tTranscriptor\tTool\tTranscription phase\tNormalisation\n\
d1\t1007\tZH\t1920\tm\tLandwirt\tPM\tEXMARaLDA\t2\tyes\n\
d2\t1008\tBE\t1915\tf\t\tAB\tEXMARaLDA\t1\tno\n\
d15\t1007\tZH\t1920\tm\tLandwirt\tPM\tEXMARaLDA\t2\tyes\n";

const D1: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
<teiHeader><fileDesc><titleStmt><title>Interview d1</title></titleStmt></fileDesc></teiHeader>
<text><body>
<u who="person_db#1007" start="media_pointers#d1-T1"><w normalised="ich" tag="PPER">Ich</w><pause/><w normalised="bin" tag="VAFIN">bi</w></u>
<u who="person_db#1007" start="media_pointers#d1-T2"><w normalised="da" tag="ADV">da</w><incident><desc>Husten</desc></incident></u>
</body></text>
</TEI>"#;

const D2: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
<teiHeader><fileDesc><titleStmt><title>Interview d2</title></titleStmt></fileDesc></teiHeader>
<text><body>
<u who="person_db#1008" start="media_pointers#d2-T1"><w normalised="ich" tag="PPER">ich</w></u>
<u who="person_db#2000" start="media_pointers#d2-T7"><w normalised="ja" tag="ITJ">ja</w></u>
</body></text>
</TEI>"#;

// fails on its second clip, which is not a WAV file
const D15: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
<teiHeader><fileDesc><titleStmt><title>Interview d15</title></titleStmt></fileDesc></teiHeader>
<text><body>
<u who="person_db#1007" start="media_pointers#d15-T1"><w normalised="zebra" tag="NN">Zebra</w></u>
<u who="person_db#3000" start="media_pointers#d15-T2"><w normalised="ja" tag="ITJ">ja</w></u>
</body></text>
</TEI>"#;

const RATE: u32 = 8000;

fn write_clip(path: &Path, seconds: f64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let samples = (seconds * f64::from(RATE)).round() as usize;
    for i in 0..samples {
        writer.write_sample((i % 128) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Writes a corpus under `root`, returning the source folder of the documents.
fn write_corpus(root: &Path, broken: bool) -> PathBuf {
    let docs = root.join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("d1_transcription.xml"), D1).unwrap();
    fs::write(docs.join("d2_transcription.xml"), D2).unwrap();
    fs::write(root.join("persons.xml"), PERSONS).unwrap();
    fs::write(root.join("metadata.tsv"), METADATA).unwrap();

    let audio = root.join("audio");
    write_clip(&audio.join("d1/d1-T1.wav"), 1.0);
    write_clip(&audio.join("d1/d1-T2.wav"), 0.6);
    write_clip(&audio.join("d2/d2-T1.wav"), 0.4);

    if broken {
        fs::write(docs.join("d15_broken.xml"), D15).unwrap();
        write_clip(&audio.join("d15/d15-T1.wav"), 0.2);
        fs::write(audio.join("d15/d15-T2.wav"), b"not a wav file").unwrap();
    }
    docs
}

fn run(root: &Path, config: Config) -> (PathBuf, CorpusSummary) {
    let docs = write_corpus(root, false);
    run_docs(root, docs, config)
}

fn run_docs(root: &Path, docs: PathBuf, config: Config) -> (PathBuf, CorpusSummary) {
    let dst = root.join("out");
    let corpus = Corpus::new(
        docs,
        dst.clone(),
        root.join("persons.xml"),
        root.join("metadata.tsv"),
        root.join("audio"),
        config,
    );
    let summary = corpus.run().unwrap();
    (dst, summary)
}

fn table(dst: &Path, name: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(dst.join(format!("{name}.csv")))
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test_log::test]
fn convert_corpus() {
    let root = tempfile::tempdir().unwrap();
    let (dst, summary) = run(root.path(), Config::default());

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.segments, 4);
    assert_eq!(summary.tokens, 5);
    assert!(summary.skipped.is_empty());

    let tokens = table(&dst, "token");
    assert_eq!(tokens[0][0], "token_id");
    assert_eq!(tokens.len(), 6);
    let ids: Vec<&str> = tokens[1..].iter().map(|t| t[0].as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

    // Ich
    assert_eq!(
        &tokens[1][1..12],
        &["1", "1", "PPER", "no", "no", "no", "no", "yes", "no", "[1,4)", "[1,26)"]
    );
    // bi, after the pause
    assert_eq!(&tokens[2][7..12], &["yes", "no", "no", "[4,6)", "[1,26)"]);
    // da shares the second clip
    assert_eq!(&tokens[3][10..12], &["[6,8)", "[26,41)"]);
    // ich, second document, new form but known lemma
    assert_eq!(&tokens[4][1..3], &["4", "1"]);
    assert_eq!(&tokens[4][10..12], &["[9,12)", "[41,51)"]);
    // ja, missing clip
    assert_eq!(&tokens[5][10..12], &["[12,14)", "[51,52)"]);

    let segments = table(&dst, "segment");
    assert_eq!(
        segments[0],
        vec!["segment_id", "who_id", "char_range", "frame_range", "audio", "file_present"]
    );
    assert_eq!(&segments[1][1..], &["1007", "[1,5)", "[1,26)", "d1-T1", "yes"]);
    assert_eq!(&segments[4][1..], &["2000", "[12,13)", "[51,52)", "d2-T7", "no"]);
    assert_eq!(tokens[1][12], segments[1][0]);

    let incidents = table(&dst, "incident");
    assert_eq!(incidents.len(), 2);
    assert_eq!(incidents[1][1], r#"{"description":"Husten"}"#);
    assert_eq!(incidents[1][2], "[8,9)");
    assert_eq!(incidents[1][3], segments[2][0]);

    let documents = table(&dst, "document");
    assert_eq!(
        documents[0],
        vec![
            "document_id",
            "id",
            "title",
            "who_id",
            "transcriptor",
            "tool",
            "transcription_phase",
            "normalisation",
            "char_range",
            "frame_range",
            "media"
        ]
    );
    assert_eq!(
        documents[1],
        vec![
            "1",
            "d1",
            "Interview d1",
            "1007",
            "PM",
            "EXMARaLDA",
            "2",
            "yes",
            "[1,9)",
            "[1,41)",
            r#"{"audio":"d1.wav"}"#
        ]
    );
    assert_eq!(&documents[2][8..10], &["[9,14)", "[41,52)"]);

    let vectors = table(&dst, "fts_vector");
    assert_eq!(vectors.len(), 5);
    assert!(vectors[1][1].starts_with("'1Ich':1 '2ich':1 '3PPER':1 "));
    assert!(vectors[1][1].contains("'1bi':2 '2bin':2 '3VAFIN':2 "));

    assert_eq!(
        table(&dst, "token_form"),
        vec![
            vec!["form_id", "form"],
            vec!["1", "Ich"],
            vec!["2", "bi"],
            vec!["3", "da"],
            vec!["4", "ich"],
            vec!["5", "ja"]
        ]
    );
    assert_eq!(table(&dst, "token_lemma").len(), 5);

    let who = table(&dst, "global_attribute_who");
    let speakers: Vec<&str> = who[1..].iter().map(|w| w[0].as_str()).collect();
    assert_eq!(speakers, vec!["1007", "1008", "2000"]);
    let p1007: serde_json::Value = serde_json::from_str(&who[1][1]).unwrap();
    assert_eq!(p1007["dialect"], "ZH");
    assert_eq!(p1007["occupation"], "Landwirt");
    assert_eq!(who[3][1], "{}");

    let meta: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dst.join("meta.json")).unwrap()).unwrap();
    assert_eq!(
        meta["layer"]["Token"]["attributes"]["xpos"]["values"],
        serde_json::json!(["PPER", "VAFIN", "ADV", "ITJ"])
    );
    assert_eq!(
        meta["layer"]["Document"]["attributes"]["transcriptor"]["values"],
        serde_json::json!(["PM", "AB"])
    );

    let d1 = WavFolder::measure(&dst.join("media/d1.wav")).unwrap();
    assert!((d1 - 1.6).abs() < 1e-3);
    let d2 = WavFolder::measure(&dst.join("media/d2.wav")).unwrap();
    assert!((d2 - 0.4).abs() < 1e-3);
}

#[test]
fn broken_document_is_skipped() {
    let clean = tempfile::tempdir().unwrap();
    let (clean_dst, _) = run(clean.path(), Config::default());

    let root = tempfile::tempdir().unwrap();
    let docs = write_corpus(root.path(), true);
    let (dst, summary) = run_docs(root.path(), docs, Config::default());

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].ends_with("d15_broken.xml"));
    assert!(!dst.join("media/d15.wav").exists());

    for name in ["token_form", "token_lemma", "document", "global_attribute_who"] {
        assert_eq!(table(&dst, name), table(&clean_dst, name), "{name}");
    }

    // every column but the segment id
    let strip = |rows: Vec<Vec<String>>| -> Vec<Vec<String>> {
        rows.into_iter()
            .map(|mut r| {
                r.pop();
                r
            })
            .collect()
    };
    assert_eq!(
        strip(table(&dst, "token")),
        strip(table(&clean_dst, "token"))
    );

    let meta = fs::read_to_string(dst.join("meta.json")).unwrap();
    assert!(!meta.contains("\"NN\""));
}

#[test]
fn token_granularity() {
    let root = tempfile::tempdir().unwrap();
    let config = Config {
        granularity: Granularity::Token,
        ..Config::default()
    };
    let (dst, _) = run(root.path(), config);

    let tokens = table(&dst, "token");
    // one second over "Ich" and "bi": 3/5 and 2/5 of it
    assert_eq!(tokens[1][11], "[1,16)");
    assert_eq!(tokens[2][11], "[16,26)");
    assert_eq!(tokens[3][11], "[26,41)");
}

#[test]
fn missing_metadata_column_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let docs = write_corpus(root.path(), false);
    fs::write(root.path().join("metadata.tsv"), "DocID\tSpeakerID\nd1\t1007\n").unwrap();

    let corpus = Corpus::new(
        docs,
        root.path().join("out"),
        root.path().join("persons.xml"),
        root.path().join("metadata.tsv"),
        root.path().join("audio"),
        Config::default(),
    );
    assert!(corpus.run().is_err());
}

#[test]
fn failed_file_keeps_media_of_same_document() {
    let root = tempfile::tempdir().unwrap();
    let docs = root.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(root.path().join("persons.xml"), PERSONS).unwrap();
    fs::write(root.path().join("metadata.tsv"), METADATA).unwrap();

    let audio = root.path().join("audio");
    write_clip(&audio.join("d1/d1-T1.wav"), 1.0);
    write_clip(&audio.join("d1/d1-T2.wav"), 0.6);
    fs::write(audio.join("d1/d1-T9.wav"), b"not a wav file").unwrap();

    // same document name, the second file fails on its clip, the third duplicates the first
    fs::write(docs.join("d1_a.xml"), D1).unwrap();
    fs::write(docs.join("d1_b.xml"), D1.replace("d1-T2", "d1-T9")).unwrap();
    fs::write(docs.join("d1_c.xml"), D1).unwrap();

    let (dst, summary) = run_docs(root.path(), docs, Config::default());

    assert_eq!(summary.documents, 1);
    let skipped: Vec<_> = summary
        .skipped
        .iter()
        .filter_map(|p| p.file_name())
        .collect();
    assert_eq!(skipped, vec!["d1_b.xml", "d1_c.xml"]);

    let documents = table(&dst, "document");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1][10], r#"{"audio":"d1.wav"}"#);

    let media = dst.join("media/d1.wav");
    assert!(media.exists());
    let duration = WavFolder::measure(&media).unwrap();
    assert!((duration - 1.6).abs() < 1e-3);
    assert!(!dst.join("media/d1.wav.part").exists());
}
