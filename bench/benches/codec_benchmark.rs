use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;
use thumbmark::db::BookmarkDb;
use thumbmark::error::Result;
use thumbmark::import_export::{import_bookmarks, netscape};
use thumbmark::models::Bookmark;
use thumbmark::thumbnails::ThumbnailStore;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nbench";

fn bookmarks(size: usize) -> Vec<Bookmark> {
    (1..=size as i64)
        .map(|i| Bookmark::new(i, format!("https://example.com/{}?a=1&b=2", i), None))
        .collect()
}

fn instant_capture(_: &str) -> Result<Vec<u8>> {
    Ok(PNG.to_vec())
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("netscape_codec");

    for size in [10, 100, 1000].iter() {
        let records = bookmarks(*size);
        group.bench_with_input(BenchmarkId::new("encode", size), &records, |b, records| {
            b.iter(|| black_box(netscape::encode_at(records, 1_700_000_000)));
        });

        let document = netscape::encode_at(&records, 1_700_000_000);
        group.bench_with_input(BenchmarkId::new("decode", size), &document, |b, document| {
            b.iter(|| black_box(netscape::decode(document).unwrap()));
        });
    }

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_pipeline");

    // capture is stubbed out; this measures decode, insert and file writes
    for size in [10, 100].iter() {
        let document = netscape::encode_at(&bookmarks(*size), 1_700_000_000);
        group.bench_with_input(BenchmarkId::new("import", size), &document, |b, document| {
            b.iter_with_setup(
                || {
                    let dir = TempDir::new().unwrap();
                    let thumbs = ThumbnailStore::new(dir.path().join("thumbnails"));
                    (BookmarkDb::init_in_memory().unwrap(), thumbs, dir)
                },
                |(db, thumbs, _dir)| {
                    black_box(import_bookmarks(&db, &thumbs, &instant_capture, document).unwrap());
                },
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec, bench_import);
criterion_main!(benches);
