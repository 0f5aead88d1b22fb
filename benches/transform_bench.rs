use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tei2tables::{
    audio::AudioSource,
    config::Config,
    error::Error,
    io::writer::DocumentBatch,
    registry::{DocumentTable, PersonRegistry},
    schema::Schema,
    transform::{CorpusState, Transformer},
};

/// Every clip lasts two seconds.
struct FixedClips;

impl AudioSource for FixedClips {
    fn duration(&self, _: &str, _: &str) -> Result<Option<f64>, Error> {
        Ok(Some(2.0))
    }

    fn concatenate(&self, _: &str, clips: &[String], _: &Path) -> Result<f64, Error> {
        Ok(clips.len() as f64 * 2.0)
    }
}

fn document(segments: usize) -> String {
    let mut xml = String::from(
        r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><teiHeader><title>bench</title></teiHeader><text><body>"#,
    );
    for i in 0..segments {
        xml.push_str(&format!(
            r#"<u who="person_db#1007" start="media_pointers#d1-T{i}"><w normalised="ich" tag="PPER">Ich</w><pause/><w normalised="sein" tag="VAFIN">bi</w><unclear><w normalised="da" tag="ADV">da</w></unclear><incident><desc>lacht</desc></incident><w normalised="gsi" tag="VAPP">gsi{i}</w></u>"#
        ));
    }
    xml.push_str("</body></text></TEI>");
    xml
}

pub fn transform(c: &mut Criterion) {
    let config = Config::default();
    let mut persons = PersonRegistry::default();
    let table = DocumentTable::from_reader(
        "DocID\tSpeakerID\tDialect area\nd1\t1007\tZH\n".as_bytes(),
        "bench",
        &[],
        &mut persons,
    )
    .unwrap();
    let media = tempfile::tempdir().unwrap();
    let transformer = Transformer::new(&config, &FixedClips, &table, media.path());
    let state = CorpusState::new(
        transformer.clock(),
        Schema::new(config.corpus.clone()),
        persons,
    );
    let xml = document(500);

    c.bench_function("document_500_segments", |b| {
        b.iter(|| {
            let mut state = state.clone();
            let mut batch = DocumentBatch::default();
            transformer
                .document("d1", black_box(&xml), &mut state, &mut batch)
                .unwrap();
            batch
        })
    });
}

criterion_group!(benches, transform);
criterion_main!(benches);
