//! Print the topology of a Chimera lattice: grid coordinates derived from
//! dense node IDs, degrees, and bond signs. The same ID arithmetic external
//! layout code uses to position the lattice.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use qanneal::graph::Coupling;
use qanneal::topology;

#[derive(Parser, Debug)]
#[command(about = "Inspect a Chimera lattice topology")]
struct Args {
    /// Lattice dimension n
    #[arg(long, default_value_t = 2)]
    size: usize,

    /// RNG seed for phases and bond signs
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    let n = args.size;

    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
    let graph = topology::chimera(n, &mut rng).expect("chimera construction");

    println!("{n}x{n} Chimera lattice: {} nodes, {} bonds", graph.n(), graph.m());
    println!();
    println!("{:>4} {:>3} {:>3}  side  degree  phase", "id", "x", "y");

    for node in graph.all_nodes() {
        let id = graph.get_id(node).expect("member id");
        // Cells hold a left node (even id) and a right node (odd id).
        let x = (id / 2) % n;
        let y = id / (2 * n);
        let side = if id % 2 == 0 { "left" } else { "right" };
        let degree = graph.neighbors(node).expect("member").count();
        let phase = graph.phase(node).expect("member");
        println!("{id:>4} {x:>3} {y:>3}  {side:<5} {degree:>6}  {phase:.4}");
    }

    println!();
    println!("bonds:");
    for edge in graph.all_edges() {
        let sign = match edge.coupling {
            Coupling::Ferro => '+',
            Coupling::Anti => '-',
        };
        println!("  {} {sign} {}", edge.a, edge.b);
    }
}
