//! Benchmarks constraint-system compilation and witness solving: building
//! and lowering a chained-squaring circuit, then solving it against a
//! witness.

use num_bigint::BigInt;
use std::time::Instant;
use structopt::StructOpt;

use zkcs::{bind_from_variables, solve, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, ScalarField, Variable};

macro_rules! timer {
    ($e:expr) => {{
        let before = Instant::now();
        let ret = $e;
        (ret, before.elapsed().as_secs() * 1000 + before.elapsed().subsec_millis() as u64)
    }};
}

/// One public input `x0`, then `public + private - 1` chained squarings;
/// every `public`-th wire along the chain is exposed.
#[derive(Clone)]
struct ChainedSquaring {
    public: usize,
    private: usize,
    x: Vec<Variable>,
}

impl ChainedSquaring {
    fn new(public: usize, private: usize) -> Self {
        ChainedSquaring {
            public,
            private,
            x: Vec::new(),
        }
    }
}

impl CircuitSchema for ChainedSquaring {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.x.push(cs.public_input("x0")?);
        for i in 1..self.public {
            self.x.push(cs.public_input(format!("x{i}"))?);
        }
        for i in 0..self.private {
            self.x.push(cs.secret_input(format!("w{i}"))?);
        }
        Ok(())
    }
}

impl Circuit for ChainedSquaring {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        let mut acc = self.x[0].clone();
        for next in &self.x[1..] {
            let squared = cs.mul(acc.clone(), acc);
            cs.assert_is_equal(squared.clone(), next.clone());
            acc = next.clone();
        }
        Ok(())
    }
}

/// A 61-bit Mersenne-prime field (`2^61 - 1`), used purely to drive the
/// solver's arithmetic at realistic width — this binary never produces a
/// proof, so it has no need for a pairing-friendly curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BenchField(u64);

const BENCH_MODULUS: u64 = (1u64 << 61) - 1;

impl ScalarField for BenchField {
    fn zero() -> Self {
        BenchField(0)
    }
    fn one() -> Self {
        BenchField(1)
    }
    fn from_big_int(value: &BigInt) -> Self {
        let m: BigInt = value.clone() % BigInt::from(BENCH_MODULUS);
        let m = if m < BigInt::from(0) { m + BigInt::from(BENCH_MODULUS) } else { m };
        let digits = m.to_u64_digits().1;
        BenchField(digits.first().copied().unwrap_or(0))
    }
    fn add(&self, other: &Self) -> Self {
        BenchField(((self.0 as u128 + other.0 as u128) % BENCH_MODULUS as u128) as u64)
    }
    fn sub(&self, other: &Self) -> Self {
        BenchField(((self.0 as u128 + BENCH_MODULUS as u128 - other.0 as u128) % BENCH_MODULUS as u128) as u64)
    }
    fn mul(&self, other: &Self) -> Self {
        BenchField(((self.0 as u128 * other.0 as u128) % BENCH_MODULUS as u128) as u64)
    }
    fn neg(&self) -> Self {
        BenchField((BENCH_MODULUS - self.0) % BENCH_MODULUS)
    }
    fn invert(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        // Fermat's little theorem: a^(p-2) mod p.
        let mut base = self.0 as u128;
        let mut exp = BENCH_MODULUS - 2;
        let modulus = BENCH_MODULUS as u128;
        let mut result = 1u128;
        while exp > 0 {
            if exp & 1 == 1 {
                result = (result * base) % modulus;
            }
            base = (base * base) % modulus;
            exp >>= 1;
        }
        Some(BenchField(result as u64))
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }
}

#[derive(Debug, StructOpt, Clone, Copy)]
#[structopt(name = "zkcs bench", about = "Benchmarking constraint-system compilation and solving.")]
struct Opts {
    #[structopt(long = "public", default_value = "1")]
    public: usize,
    #[structopt(long = "private", default_value = "1000000")]
    private: usize,
    #[structopt(long = "samples", default_value = "10")]
    samples: usize,
    #[structopt(long = "solve")]
    solve: bool,
}

fn main() {
    pretty_env_logger::init_timed();
    let opts = Opts::from_args();

    for _ in 0..opts.samples {
        let mut cs = ConstraintSystem::new();
        let mut circuit = ChainedSquaring::new(opts.public, opts.private);
        let ((), took_build) = timer!(zkcs::synthesize(&mut circuit, &mut cs).unwrap());
        let (r1cs, took_compile) = timer!(cs.compile(CurveId::Untyped).unwrap());
        println!(
            "{} public, {} private: build {}ms, compile {}ms ({} constraints)",
            opts.public,
            opts.private,
            took_build,
            took_compile,
            r1cs.constraints.len()
        );

        if opts.solve {
            let mut values = vec![BigInt::from(2)];
            for _ in 1..(opts.public + opts.private) {
                let prev = values.last().unwrap().clone();
                values.push(&prev * &prev % BigInt::from(BENCH_MODULUS));
            }
            let mut public_vars = circuit.x[..opts.public].to_vec();
            let mut secret_vars = circuit.x[opts.public..].to_vec();
            for (v, val) in public_vars.iter_mut().zip(values[..opts.public].iter()) {
                v.assign(val.clone());
            }
            for (v, val) in secret_vars.iter_mut().zip(values[opts.public..].iter()) {
                v.assign(val.clone());
            }
            let witness = bind_from_variables(&public_vars, &secret_vars).unwrap();
            let (_out, took_solve) = timer!(solve::<BenchField>(&r1cs, &witness).unwrap());
            println!("  solve {took_solve}ms");
        }
    }
}
