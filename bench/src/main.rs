use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use neuronet_core::{Engine, EngineConfig, NodeId};

type EdgeList = Vec<(NodeId, NodeId)>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: neuronet-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!("  sparse      Random edges over ids scattered across the u64 range");
        println!();
        println!("Default node_count: 1000000");
        return;
    }

    println!("neuronet-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> EdgeList)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "sparse" => vec![("Sparse id space", gen_sparse_ids)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> EdgeList),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
            ("Sparse id space", gen_sparse_ids),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, node_count) {
            eprintln!("{name}: {e}");
        }
    }
}

fn run_benchmark(
    name: &str,
    generator: fn(u64) -> EdgeList,
    node_count: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let start = edges.first().map(|e| e.0).unwrap_or(0);
    println!("Generated {} edges in {:.2}s", edges.len(), t.elapsed().as_secs_f64());

    // Load through the text path so ingestion is part of the measurement.
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("edges.txt");
    let mut w = BufWriter::new(File::create(&path)?);
    for (from, to) in &edges {
        writeln!(w, "{from} {to}")?;
    }
    w.flush()?;
    drop(w);
    drop(edges);

    let config = EngineConfig::default().with_max_memory_mb(neuronet_core::MAX_MAX_MEMORY_MB);
    let mut engine = Engine::new(config);
    let report = engine.load(&path)?;
    println!(
        "Loaded in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        report.load_time_ms / 1000.0,
        report.node_count,
        report.edge_count,
        report.memory_estimate_bytes as f64 / 1_048_576.0
    );
    let (hub, hub_degree) = engine.max_degree_node()?;
    println!("Max out-degree: node {} ({} edges)", hub, hub_degree);

    println!();
    println!(
        "{:>8} {:>12} {:>12} {:>10} {:>12} {:>10}",
        "depth", "found", "scanned", "bfs", "induced", "subgraph"
    );
    println!(
        "{:->8} {:->12} {:->12} {:->10} {:->12} {:->10}",
        "", "", "", "", "", ""
    );

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = engine.bfs_neighborhood(start, depth)?;
        let bfs_time = t.elapsed();

        let nodes = result.node_ids();
        let t = Instant::now();
        let induced = engine.induced_edges(&nodes)?;
        let induced_time = t.elapsed();

        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms {:>12} {:>8.1}ms",
            depth,
            nodes.len(),
            result.edges_scanned,
            bfs_time.as_secs_f64() * 1000.0,
            induced.len(),
            induced_time.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if nodes.len() >= report.node_count {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    engine.print_summary()?;
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: each node spawns 3 children. Deep BFS, wide frontiers.
fn gen_lsystem(node_count: u64) -> EdgeList {
    let branching = 3u64;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: u64) -> EdgeList {
    let edges_per_node = 10u64;
    let mut edges = Vec::with_capacity((node_count * edges_per_node) as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        for _ in 0..edges_per_node.min(new_node) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                edges.push((new_node, target));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice with each edge rewired with
/// probability p. High clustering, short paths.
fn gen_small_world(node_count: u64) -> EdgeList {
    let k = 10u64;
    let p = 0.05f64;
    let mut edges = Vec::with_capacity((node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: ~10 uniform random edges per node. No structure.
fn gen_random(node_count: u64) -> EdgeList {
    let target_edges = node_count * 10;
    let mut edges = Vec::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push((from, to));
        }
    }

    edges
}

/// Barbell: two dense cliques joined by a chain of 10 bridge nodes.
fn gen_barbell(node_count: u64) -> EdgeList {
    let bridge_len = 10u64;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut edges = Vec::with_capacity((clique_size * 40 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);
    let fanout = 20u64.min(clique_size.saturating_sub(1));

    for i in 0..clique_size {
        for _ in 0..fanout {
            let target = rng.next(clique_size);
            if target != i {
                edges.push((i, target));
            }
        }
    }

    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { clique_size.saturating_sub(1) } else { id - 1 };
        edges.push((prev, id));
    }

    let b_start = bridge_start + bridge_len;
    edges.push((b_start - 1, b_start));
    for i in 0..clique_size {
        for _ in 0..fanout {
            let target = rng.next(clique_size);
            if target != i {
                edges.push((b_start + i, b_start + target));
            }
        }
    }

    edges
}

/// DLA (Diffusion-Limited Aggregation): each new node attaches to a recent
/// "surface" node, with occasional long-range shortcuts. Edges point from the
/// hub outward so BFS from node 0 follows the growth.
fn gen_dla(node_count: u64) -> EdgeList {
    let mut edges = Vec::with_capacity((node_count * 2) as usize);
    let mut rng = FastRng::new(77777);

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push((attach_to, new_node));

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                edges.push((new_node, other));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}

/// Random edges whose ids are spread over the full u64 range. Exercises the
/// id remapping: memory must track node count, not id magnitude.
fn gen_sparse_ids(node_count: u64) -> EdgeList {
    let scatter = |i: u64| i.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    gen_random(node_count)
        .into_iter()
        .map(|(from, to)| (scatter(from), scatter(to)))
        .collect()
}
