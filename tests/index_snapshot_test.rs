//! Integration tests for corpus ingestion, snapshot persistence and reload.

use std::fs;
use std::sync::Arc;
use std::thread;

use curio::document::converter::DocumentConverter;
use curio::document::converter::trec::TrecDocumentConverter;
use curio::prelude::*;
use tempfile::TempDir;

const CORPUS: &str = r#"
<DOC>
<DOCNO>itch-0001</DOCNO>
<TITLE>Minit $4.99</TITLE>
<AUTHOR>Jan Willem Nijman</AUTHOR>
<URL>https://example.itch.io/minit</URL>
<TEXT>
A peculiar little adventure
played sixty seconds at a time.
</TEXT>
</DOC>
<DOC>
<DOCNO>itch-0002</DOCNO>
<TITLE>A Short Hike</TITLE>
<AUTHOR>adamgryu</AUTHOR>
<TEXT>Hike, climb, and soar through the peaceful mountainside landscapes of Hawk Peak Provincial Park.</TEXT>
</DOC>
<DOC>
<TITLE>No number, never indexed</TITLE>
<TEXT>adventure adventure adventure</TEXT>
</DOC>
<DOC>
<DOCNO>itch-0003</DOCNO>
<TITLE>Celeste $19.99</TITLE>
<TEXT>Help Madeline survive her inner demons on her journey to the top of Celeste Mountain.</TEXT>
</DOC>
"#;

fn write_corpus(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("games.trectext");
    fs::write(&path, CORPUS).unwrap();
    path
}

fn build_index(dir: &TempDir) -> Result<InvertedIndex> {
    let entries = TrecDocumentConverter::new().convert(write_corpus(dir))?;
    let mut writer = IndexWriter::new(Normalizer::default());
    writer.add_entries(entries)?;
    Ok(writer.finish())
}

#[test]
fn test_corpus_fields_reach_search_hits() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let index = build_index(&dir)?;
    assert_eq!(index.doc_count(), 3);

    let searcher = CatalogSearcher::new(Arc::new(index), SearchConfig::default())?;
    let hits = searcher.search("adventure", 10)?;

    assert_eq!(hits.len(), 1);
    let minit = &hits[0];
    assert_eq!(minit.doc_no, "itch-0001");
    assert_eq!(minit.title, "Minit");
    assert_eq!(minit.price, "$4.99");
    assert_eq!(minit.author, "Jan Willem Nijman");
    assert_eq!(minit.url, "https://example.itch.io/minit");
    assert_eq!(
        minit.description,
        "A peculiar little adventure played sixty seconds at a time."
    );
    assert_eq!(
        minit.highlighted_description,
        "A peculiar little <mark>adventure</mark> played sixty seconds at a time."
    );
    Ok(())
}

#[test]
fn test_snapshot_round_trip_preserves_rankings() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let index = build_index(&dir)?;
    let path = dir.path().join("games.idx");
    index.save(&path)?;

    let in_memory = CatalogSearcher::new(Arc::new(index), SearchConfig::default())?;
    let on_disk = CatalogSearcher::new(IndexStore::open(&path)?, SearchConfig::default())?;

    for query in ["mountain", "climb hike", "celeste demons", "time"] {
        assert_eq!(in_memory.search(query, 10)?, on_disk.search(query, 10)?);
    }
    Ok(())
}

#[test]
fn test_corrupted_snapshot_is_rejected() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("games.idx");
    build_index(&dir)?.save(&path)?;

    let mut bytes = fs::read(&path)?;
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x5a;
    fs::write(&path, &bytes)?;

    assert!(matches!(InvertedIndex::open(&path), Err(CurioError::Storage(_))));
    assert!(matches!(IndexStore::open(&path), Err(CurioError::Storage(_))));
    Ok(())
}

#[test]
fn test_reload_is_visible_to_later_searches_only() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("games.idx");
    build_index(&dir)?.save(&path)?;

    let searcher = Arc::new(CatalogSearcher::new(IndexStore::open(&path)?, SearchConfig::default())?);
    assert!(searcher.search("speedrun", 10)?.is_empty());

    let held = searcher.source().snapshot()?;

    let mut writer = IndexWriter::new(Normalizer::default());
    writer.add_entry(CatalogEntry::new("itch-0009").with_title("Neon").with_description("a speedrun game"))?;
    writer.finish().save(&path)?;

    let reloader = {
        let searcher = Arc::clone(&searcher);
        thread::spawn(move || searcher.source().reload())
    };
    reloader.join().expect("reload thread panicked")?;

    // The snapshot taken before the reload still sees the old catalog.
    assert_eq!(held.live_documents()?.len(), 3);

    let hits = searcher.search("speedrun", 10)?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Neon");
    Ok(())
}

#[test]
fn test_concurrent_searches_share_one_store() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("games.idx");
    build_index(&dir)?.save(&path)?;

    let searcher = Arc::new(CatalogSearcher::new(IndexStore::open(&path)?, SearchConfig::default())?);
    let expected = searcher.search("mountain", 10)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let searcher = Arc::clone(&searcher);
            thread::spawn(move || searcher.search("mountain", 10))
        })
        .collect();

    for handle in handles {
        let hits = handle.join().expect("search thread panicked")?;
        assert_eq!(hits, expected);
    }
    Ok(())
}
