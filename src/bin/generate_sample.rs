//! Generate sample data for the viewer by solving the coupled system
//!
//! ```text
//! u_t = D u_xx + v
//! v_t = D v_xx - u
//! ```
//!
//! on a periodic domain with Strang splitting: half a step of diffusion,
//! a full step of the (exact) rotation, then another half step of diffusion.
//! Each time step appends one `time,position,u,v` row per grid point.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Solve the coupled diffusion system and write time,position,u,v rows")]
struct Args {
    /// Parameter file holding `D L nx t_F` separated by whitespace
    #[arg(short, long, default_value = "input.txt")]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "diffusion_data")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Params {
    /// Diffusion coefficient.
    d: f64,
    /// Domain length.
    length: f64,
    /// Number of grid points, the last one duplicating the first.
    nx: usize,
    /// Final simulation time.
    t_final: f64,
}

impl Params {
    fn parse(text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 4 {
            bail!("expected 4 parameters (D L nx t_F), found {}", fields.len());
        }
        let d: f64 = fields[0].parse().context("parsing D")?;
        let length: f64 = fields[1].parse().context("parsing L")?;
        let nx: usize = fields[2].parse().context("parsing nx")?;
        let t_final: f64 = fields[3].parse().context("parsing t_F")?;

        ensure!(d > 0.0, "D must be positive, got {d}");
        ensure!(length > 0.0, "L must be positive, got {length}");
        ensure!(nx >= 3, "nx must be at least 3, got {nx}");
        ensure!(t_final > 0.0, "t_F must be positive, got {t_final}");

        Ok(Params {
            d,
            length,
            nx,
            t_final,
        })
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid parameters in {}", path.display()))
    }

    fn dx(&self) -> f64 {
        self.length / (self.nx - 1) as f64
    }

    /// Largest stable step for the explicit diffusion half steps.
    fn dt(&self) -> f64 {
        let dx = self.dx();
        dx * dx / (2.0 * self.d)
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

struct Solver {
    params: Params,
    time: f64,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl Solver {
    fn new(params: Params) -> Self {
        let dx = params.dx();
        let u = (0..params.nx)
            .map(|k| 1.0 + (2.0 * PI * k as f64 * dx / params.length).sin())
            .collect();
        Solver {
            params,
            time: 0.0,
            u,
            v: vec![0.0; params.nx],
        }
    }

    /// Explicit diffusion over `tau` on the periodic ring of `nx - 1`
    /// distinct points.
    fn diffuse(&self, field: &[f64], tau: f64) -> Vec<f64> {
        let m = self.params.nx - 1;
        let dx = self.params.dx();
        let coeff = self.params.d * tau / (dx * dx);
        let mut out = vec![0.0; self.params.nx];
        for k in 0..m {
            let left = field[(k + m - 1) % m];
            let right = field[(k + 1) % m];
            out[k] = field[k] + coeff * (left + right - 2.0 * field[k]);
        }
        out[m] = out[0];
        out
    }

    fn step(&mut self) {
        let dt = self.params.dt();

        let u1 = self.diffuse(&self.u, 0.5 * dt);
        let v1 = self.diffuse(&self.v, 0.5 * dt);

        let (s, c) = dt.sin_cos();
        let u2: Vec<f64> = u1.iter().zip(&v1).map(|(&u, &v)| c * u + s * v).collect();
        let v2: Vec<f64> = u1.iter().zip(&v1).map(|(&u, &v)| -s * u + c * v).collect();

        self.u = self.diffuse(&u2, 0.5 * dt);
        self.v = self.diffuse(&v2, 0.5 * dt);
        self.time += dt;
    }

    fn write_rows<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        let dx = self.params.dx();
        for k in 0..self.params.nx {
            writer.serialize((self.time, k as f64 * dx, self.u[k], self.v[k]))?;
        }
        Ok(())
    }

    /// Step until the final time, writing every step.
    fn run<W: std::io::Write>(&mut self, writer: &mut csv::Writer<W>) -> Result<usize> {
        let mut steps = 0;
        while self.time < self.params.t_final {
            self.step();
            self.write_rows(writer)?;
            steps += 1;
        }
        writer.flush()?;
        Ok(steps)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = Params::read(&args.input)?;
    log::info!(
        "D = {}, L = {}, nx = {}, t_F = {} (dx = {:.4e}, dt = {:.4e})",
        params.d,
        params.length,
        params.nx,
        params.t_final,
        params.dx(),
        params.dt()
    );

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut solver = Solver::new(params);
    let steps = solver.run(&mut writer)?;

    println!(
        "Wrote {} steps × {} points to {}",
        steps,
        params.nx,
        args.output.display()
    );
    Ok(())
}
