use formulary_compute::expr::{Expr, Latex, Sign};
use formulary_compute::func::Func;
use formulary_compute::solve::Equation;
use formulary_compute::{Ctxt, TrigMode};

fn main() {
    // a = v^2 / r + g * sin(theta)
    let lhs = Expr::variable("a");
    let rhs = Expr::addition(
        Expr::multiplication(
            Expr::power(Expr::variable("v"), Expr::Constant(2.0)),
            Sign::Positive,
            Expr::variable("r"),
            Sign::Negative,
        ),
        Sign::Positive,
        Expr::multiplication(
            Expr::variable("g"),
            Sign::Positive,
            Expr::call(Func::Sin, Expr::variable("theta")),
            Sign::Positive,
        ),
        Sign::Positive,
    );
    let mut equation = Equation::new(lhs, rhs);

    println!("{equation}");
    println!("{}", equation.as_display());
    println!("free variables: {:?}", equation.rhs.free_variables());

    for (name, value) in [("a", 12.0), ("v", 6.0), ("g", 9.81), ("theta", 30.0)] {
        equation.set_variable(name, value);
    }

    let mut steps = Vec::new();
    let solved = match equation.solve_with_steps("r", &mut steps) {
        Ok(solved) => solved,
        Err(reason) => {
            eprintln!("cannot solve for r: {reason}");
            return;
        },
    };

    for step in &steps {
        println!("{step:?}");
    }
    println!("{solved}");
    println!("{}", solved.as_display());

    let ctxt = Ctxt::with_trig_mode(TrigMode::Degrees);
    match solved.rhs.eval(&ctxt) {
        Ok(value) => println!("r = {value}"),
        Err(err) => {
            let (src, _) = solved.rhs.render_spans();
            eprintln!("{}", err.report_to_string("rhs", &src));
        },
    }
}
