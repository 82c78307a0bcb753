//! Prompt templates.
//!
//! Both templates only interpolate the free-text fields of a [`MedicalRecord`]; history and
//! prescriptions are never sent to the model.

use portal_core::records::MedicalRecord;

/// Briefing for first responders attending an emergency alert.
pub fn first_aid_prompt(record: &MedicalRecord) -> String {
    format!(
        "You are an emergency medical assistant.\n\
         A patient has triggered an emergency alert.\n\
         Here are their medical details:\n\
         - Blood Type: {blood_type}\n\
         - Allergies: {allergies}\n\
         - Conditions: {conditions}\n\
         - Medications: {medications}\n\
         \n\
         Provide a brief, professional 3-sentence summary for first responders on what to be \
         careful about (e.g., allergies, drug interactions) and immediate steps based on these \
         conditions.",
        blood_type = record.blood_type,
        allergies = record.allergies,
        conditions = record.conditions,
        medications = record.medications,
    )
}

/// General hospital guidance for symptoms a patient reports. The model is told not to diagnose.
pub fn symptom_triage_prompt(symptoms: &str, record: &MedicalRecord) -> String {
    format!(
        "You are a hospital information assistant. A patient is reporting the following \
         symptoms: \"{symptoms}\".\n\
         Their medical context: {conditions}, Allergies: {allergies}.\n\
         \n\
         Provide general hospital information and next steps.\n\
         1. Acknowledge the symptoms.\n\
         2. Provide general self-care advice or hospital navigation (e.g., visit the ER if pain \
         is severe, or book a consultation).\n\
         3. Keep it brief and informative. Do not diagnose.",
        symptoms = symptoms.trim(),
        conditions = record.conditions,
        allergies = record.allergies,
    )
}
