/// quick start - generate a schedule and apply the first payment
use loan_servicing_rs::chrono::NaiveDate;
use loan_servicing_rs::{
    Loan, LoanTerms, Money, PaymentFrequency, PaymentMethod, PaymentProcessor, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // a $10,000 loan at 5% monthly over 3 months
    let terms = LoanTerms::new(
        Money::from_major(10_000),
        Rate::from_percentage(dec!(5)),
        3,
        PaymentFrequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    );

    let mut loan = Loan::create(terms, &time)?;

    println!("periodic payment: {}", loan.schedule.periodic_payment);
    println!("total interest:   {}", loan.schedule.total_interest);
    for installment in &loan.schedule.installments {
        println!(
            "  #{} due {}  payment {}  principal {}  interest {}  balance {}",
            installment.number,
            installment.due_date,
            installment.payment_amount,
            installment.principal_portion,
            installment.interest_portion,
            installment.remaining_balance,
        );
    }

    // settle the first installment at the quoted amount
    let amount = loan.schedule.periodic_payment;
    let payment =
        PaymentProcessor::new().apply_payment(&mut loan, 1, amount, PaymentMethod::Cash, &time)?;

    println!(
        "paid installment 1: interest {} / principal {}",
        payment.interest_portion, payment.principal_portion
    );

    Ok(())
}
