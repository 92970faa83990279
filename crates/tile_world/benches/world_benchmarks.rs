//! Benchmarks for chunk generation, the update sweep and collision queries.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tile_world::{
  CHUNK_WIDTH, Chunk, ChunkGenerator, ChunkMap, FlatGenerator, TerrainGenerator, TileRegistry,
  WORLD_HEIGHT,
};

fn flat_map() -> ChunkMap {
  ChunkMap::new(
    Arc::new(FlatGenerator::new(0, 96)),
    Arc::new(TileRegistry::new()),
  )
}

fn bench_generation(c: &mut Criterion) {
  let mut group = c.benchmark_group("generation");
  group.throughput(Throughput::Elements((CHUNK_WIDTH * WORLD_HEIGHT) as u64));

  let flat = FlatGenerator::new(0, 96);
  let terrain = TerrainGenerator::new(42);
  let generators: [(&str, &dyn ChunkGenerator); 2] = [("flat", &flat), ("terrain", &terrain)];

  for (name, generator) in generators {
    group.bench_function(BenchmarkId::new(name, "chunk"), |b| {
      let mut index = 0;
      b.iter(|| {
        let mut chunk = Chunk::new(black_box(index));
        generator.generate(&mut chunk);
        index += 1;
        chunk
      })
    });
  }
  group.finish();
}

fn bench_update_sweep(c: &mut Criterion) {
  let mut group = c.benchmark_group("update_sweep");
  for resident in [2, 5] {
    let mut map = flat_map();
    for index in 0..resident {
      map.get_or_create_chunk(index);
    }
    group.throughput(Throughput::Elements(
      resident as u64 * (CHUNK_WIDTH * WORLD_HEIGHT) as u64,
    ));
    group.bench_with_input(BenchmarkId::from_parameter(resident), &resident, |b, _| {
      b.iter(|| map.update_tiles())
    });
  }
  group.finish();
}

fn bench_collision(c: &mut Criterion) {
  let mut map = flat_map();
  map.stream(128.0);

  c.bench_function("collision_check_box/player", |b| {
    let mut x = 0.0;
    b.iter(|| {
      x = (x + 0.37) % 200.0;
      map.collision_check_box(black_box(x), black_box(95.9), 0.6, 1.8)
    })
  });

  c.bench_function("collision_check_point", |b| {
    let mut x = 0.0;
    b.iter(|| {
      x = (x + 0.37) % 200.0;
      map.collision_check_point(black_box(x), black_box(95.5))
    })
  });
}

criterion_group!(benches, bench_generation, bench_update_sweep, bench_collision);
criterion_main!(benches);
