//! Example declaring inventory records with both class-building entries.

use std::io::{self, Write};

use record_synth::{
    Arguments, DataClass, DeclaredClass, OptionOverrides, Value, as_dict, make_dataclass, replace,
};

/// A stock-keeping unit, declared statically.
#[expect(dead_code, reason = "the struct only declares the class")]
#[derive(DataClass)]
#[dataclass(frozen, order)]
struct Sku {
    code: String,
    #[dataclass(default = 1)]
    quantity: i64,
}

fn main() -> anyhow::Result<()> {
    let sku = Sku::data_class()?;
    let widget = sku.construct(Arguments::new().arg("W-1"))?;
    let restocked = replace(&widget, [("quantity", 40)])?;

    let shelf = make_dataclass(
        "Shelf",
        [("label", "str"), ("items", "list")],
        [("items", Value::List(Vec::new()))],
        &[],
        &OptionOverrides::new().kw_only(true),
    )?;
    let aisle = shelf.construct(
        Arguments::new()
            .kwarg("label", "A1")
            .kwarg("items", vec![Value::from(widget.clone()), Value::from(restocked.clone())]),
    )?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{widget} < {restocked}: {}", widget.lt(&restocked)?)?;
    writeln!(stdout, "{aisle}")?;
    writeln!(stdout, "{}", as_dict(&aisle)?)?;
    Ok(())
}
