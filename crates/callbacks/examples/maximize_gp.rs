//! Trains a Kriging model on five points and maximizes its prediction.
//!
//! Run with `RUST_LOG=debug cargo run -p surrox-callbacks --example maximize_gp
//! --features egobox` to see every evaluation.

use std::error::Error;

use ndarray::array;

use surrox_callbacks::{EgoboxSurrogate, OutputKind, SurrogateCallback, SurrogateModel};
use surrox_solvers::{
    Bounds,
    lbfgs::{self, Config, Event},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let xt = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
    let yt = array![0.0, 1.0, 1.5, 0.9, 1.0];

    let gp = EgoboxSurrogate::train(xt.view(), yt.view())?;
    let model = SurrogateModel::new(gp)?;
    let objective = SurrogateCallback::new("sm", model, OutputKind::Predict);

    let bounds = Bounds::interval(0.0, 4.0)?;
    let observer = |event: &Event<'_, _>| {
        if let Event::Evaluated { x, objective, .. } = event {
            println!("  f({:.6}) = {objective:.6}", x[0]);
        }
        None
    };

    let solution = lbfgs::maximize(&objective, &[1.0], &bounds, &Config::default(), observer)?;

    println!(
        "{:?}: x = {:.6}, f = {:.6}",
        solution.status, solution.x[0], solution.objective
    );
    Ok(())
}
