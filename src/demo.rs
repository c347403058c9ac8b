use crate::infra::{InMemorySubmissionSink, PresetSignaturePad, PresetUploads};
use chrono::Utc;
use clap::Args;
use guest_registration::config::FormConfig;
use guest_registration::error::AppError;
use guest_registration::registration::{
    FileHandle, FormEvent, FormStateEngine, GuestField, GuestRecord, Nationality, Sex,
    SubmitError, SubmissionSink,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stop after the rejected submission instead of uploading the marriage certificate.
    #[arg(long)]
    pub(crate) skip_certificate: bool,
}

pub(crate) fn run_demo(args: DemoArgs, form: FormConfig) -> Result<(), AppError> {
    let sink = Arc::new(InMemorySubmissionSink::default());
    let mut engine = FormStateEngine::new(sink, form);

    println!("Guest registration demo");

    engine.apply(FormEvent::GuestCountChanged {
        value: "2".to_string(),
    })?;
    fill_guest(&mut engine, 0, "Salma Idrissi", Sex::Female, Nationality::Moroccan)?;
    fill_guest(&mut engine, 1, "Pierre Durand", Sex::Male, Nationality::French)?;

    engine.upload_identification(&mut PresetUploads(vec![
        FileHandle::new("cin-salma-recto.jpg", 640_000),
        FileHandle::new("passport-pierre.jpg", 910_000),
    ]))?;
    engine.apply(FormEvent::TermsChanged {
        value: "accepted".to_string(),
    })?;
    engine.capture_signature(&mut PresetSignaturePad(
        "data:image/png;base64,iVBORw0KGgo=".to_string(),
    ))?;

    render_guests(&engine.aggregate().guests, form.max_guests);
    println!(
        "Marriage certificate required: {}",
        yes_no(engine.requires_marriage_certificate())
    );

    match engine.submit(Utc::now()) {
        Ok(receipt) => {
            println!("\nSubmitted as {}", receipt.reference);
            return Ok(());
        }
        Err(SubmitError::Invalid(errors)) => {
            println!("\nFirst submission rejected");
            for (path, message) in errors.messages() {
                println!("- {path}: {message}");
            }
        }
        Err(other) => return Err(other.into()),
    }

    if args.skip_certificate {
        return Ok(());
    }

    engine.upload_marriage_certificate(&mut PresetUploads(vec![FileHandle::new(
        "acte-de-mariage.pdf",
        1_300_000,
    )]))?;
    let receipt = engine.submit(Utc::now())?;

    println!(
        "\nSubmitted as {} at {} (state: {})",
        receipt.reference,
        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        engine.state().label()
    );

    Ok(())
}

fn fill_guest<S>(
    engine: &mut FormStateEngine<S>,
    index: usize,
    name: &str,
    sex: Sex,
    nationality: Nationality,
) -> Result<(), AppError>
where
    S: SubmissionSink,
{
    let edits = [
        (GuestField::FullName, name),
        (GuestField::Sex, sex.label()),
        (GuestField::Nationality, nationality.as_str()),
    ];
    for (field, value) in edits {
        engine.apply(FormEvent::GuestFieldChanged {
            index,
            field,
            value: value.to_string(),
        })?;
    }
    Ok(())
}

fn render_guests(guests: &[GuestRecord], max_guests: u8) {
    println!("Guests: {} (limit {})", guests.len(), max_guests);
    for (index, guest) in guests.iter().enumerate() {
        let sex = guest.sex.map(Sex::label).unwrap_or("unset");
        let nationality = if guest.nationality.is_empty() {
            "unset"
        } else {
            guest.nationality.as_str()
        };
        println!(
            "- Guest {}: {}, {}, {}",
            index + 1,
            guest.full_name,
            sex,
            nationality
        );
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
