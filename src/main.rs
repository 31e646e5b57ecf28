#![allow(non_snake_case)]
use RustedNumLab::quadrature::simpson_quad::cumulative_probability;
use RustedNumLab::somelinalg::direct_solver_api::{residual_norm, solve_linear_system};
use nalgebra::{DMatrix, DVector};
use simplelog::*;
use std::io::{self, Write};

/// Solve the worked 4x4 system embedded in the program and report which
/// decomposition the dispatcher picked. A1 is symmetric positive definite
/// so the Cholesky branch is expected.
fn linear_system_demo() {
    let A1 = DMatrix::from_row_slice(
        4,
        4,
        &[
            1.0, -1.0, 3.0, 2.0, -1.0, 5.0, -5.0, -2.0, 3.0, -5.0, 19.0, 3.0, 2.0, -2.0, 3.0, 21.0,
        ],
    );
    let b1 = DVector::from_vec(vec![15.0, -35.0, 94.0, 1.0]);

    match solve_linear_system(&A1, &b1) {
        Ok((x, method)) => {
            println!("solution using {:?}: {}", method, x.transpose());
            println!("method: {}", method.description());
            println!("residual norm ||Ax - b|| = {:.3e}", residual_norm(&A1, &x, &b1));
        }
        Err(e) => println!("failed to solve the system: {}", e),
    }
}

/// prompt for one number on stdin; a non-numeric answer is reported with a
/// clear message instead of panicking
fn prompt_number(prompt: &str) -> Option<f64> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        println!("could not read from stdin");
        return None;
    }
    match line.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("'{}' is not a number", line.trim());
            None
        }
    }
}

/// Read degrees of freedom and a z value, then integrate the t-distribution
/// density from 0 to z by Simpson's rule with 1000 intervals. All input
/// validation happens here at the boundary, the library functions take
/// already-typed arguments.
fn t_probability_prompt() {
    let Some(v) = prompt_number("Enter degrees of freedom (v): ") else {
        return;
    };
    let Some(z) = prompt_number("Enter z value: ") else {
        return;
    };
    match cumulative_probability(v, z) {
        Ok(probability) => println!("Probability for v={} and z={}: {}", v, z, probability),
        Err(e) => println!("cannot compute the probability: {}", e),
    }
}

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    let example = 2;
    match example {
        // worked linear system only
        0 => linear_system_demo(),
        // interactive t-distribution probability only
        1 => t_probability_prompt(),
        // both exercises one after another
        2 => {
            linear_system_demo();
            t_probability_prompt();
        }
        _ => println!("no such example"),
    }
}
