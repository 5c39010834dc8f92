//! Parsing helper for `/proc/loadavg`.

pub fn parse_loadavg(content: &str) -> Option<(f64, f64, f64)> {
    let mut fields = content.split_whitespace().map(str::parse::<f64>);
    let one = fields.next()?.ok()?;
    let five = fields.next()?.ok()?;
    let fifteen = fields.next()?.ok()?;
    Some((one, five, fifteen))
}
