use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metakit::{write_packed_int, write_packed_string};

/// A synthetic container with one wide table of mixed column types.
fn build_container(rows: u32) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..rows {
        write_packed_string(&mut data, &format!("name{}", i));
    }
    for i in 0..rows {
        data.extend_from_slice(&(i as i32).to_be_bytes());
    }
    for i in 0..rows {
        data.extend_from_slice(&(i as f64 / 50.0).to_be_bytes());
    }

    let mut toc = Vec::new();
    write_packed_int(&mut toc, 1);
    write_packed_string(&mut toc, "Items[_H:[name:S,id:I,score:D],]");
    write_packed_int(&mut toc, u64::from(rows));
    write_packed_int(&mut toc, 0);
    toc.extend_from_slice(&data);

    let toc_location = 8u32;
    let footer_location = toc_location + toc.len() as u32;
    let root = footer_location + 16;

    let mut file = Vec::new();
    file.extend_from_slice(b"JL");
    file.push(26);
    file.push(0);
    file.extend_from_slice(&root.to_be_bytes());
    file.extend_from_slice(&toc);
    file.extend_from_slice(&[0; 4]);
    file.extend_from_slice(&0u32.to_be_bytes());
    file.extend_from_slice(&[0; 4]);
    file.extend_from_slice(&toc_location.to_be_bytes());
    file
}

fn container_decode(c: &mut Criterion) {
    let bytes = build_container(10000);
    c.bench_function("container_decode", |b| {
        b.iter(|| {
            let db = metakit::from_bytes(black_box(&bytes)).unwrap();
            black_box(db);
        })
    });
}

criterion_group!(benches, container_decode);
criterion_main!(benches);
