use labinterp_core::classify::classify_str;
use labinterp_core::derived::mean_glucose_from_hba1c;
use labinterp_core::error::LabError;
use labinterp_core::parsing::range::ReferenceRange;
use labinterp_core::parsing::values::parse_leading_number;

pub fn check(value: &str, range: &str) -> Result<(), LabError> {
    if let Err(e) = ReferenceRange::parse(range) {
        tracing::warn!(error = %e, "range cannot be classified");
    }
    println!("{}", classify_str(value, range));
    Ok(())
}

pub fn eag(hba1c: &str) -> Result<(), LabError> {
    let value = parse_leading_number(hba1c).ok_or_else(|| {
        LabError::ObservationsLoad(format!("HbA1c value '{hba1c}' is not a number"))
    })?;
    println!("HbA1c:                     {value} %");
    println!(
        "Estimated average glucose: {} mg/dL",
        mean_glucose_from_hba1c(value)
    );
    Ok(())
}
