//! Registration, consent and health declaration form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical activity readiness questions, answered yes/no in order
pub const MEDICAL_QUESTIONS: [&str; 8] = [
    "Do you suffer from any medical conditions the Camp Operator & ADSS should be aware of?",
    "Has your doctor ever said that you have a heart condition and that you should only do physical activity/exercise recommended by a doctor?",
    "Do you feel pain in your chest at any point in time?",
    "Do you lose your balance because of dizziness or do you ever lose consciousness?",
    "Do you have a bone or joint problem?",
    "Do you suffer from any of the following: hypertension, asthma; diabetes; epilepsy; high blood pressure, fainting episodes, breathlessness, fast heart beat, Kidney disease, autoimmune disease, liver disease? (if so, please give details)",
    "Do you have any current injuries or conditions, and if so, are they being treated by a doctor or other health professional such as a physiotherapist? (if so, please give details)",
    "Do you know of any other reason why you should not do physical activity/ exercise?",
];

/// Form as posted by the consent page. Signatures are PNG data URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentSubmission {
    pub parent_booking: Uuid,

    // kid
    pub kid_full_name: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
    pub language: String,

    // parents / guardians
    pub parent1_name: String,
    pub parent1_relation: String,
    pub parent1_phone: String,
    pub parent1_email: String,
    pub parent2_name: String,
    pub parent2_phone: String,

    pub emergency_name: String,
    pub emergency_relation: String,
    pub emergency_phone1: String,
    pub emergency_phone2: String,

    // pick up and drop
    pub pickup_list: String,
    pub pickup_name1: String,
    pub pickup_number1: String,
    pub pickup_name2: String,
    pub pickup_number2: String,

    /// One "yes"/"no" per entry of [`MEDICAL_QUESTIONS`]
    pub medical_answers: Vec<String>,
    pub health_info: String,
    pub medications: String,
    pub health_concerns: String,

    // declaration
    pub player_name: String,
    pub guardian_name: String,
    pub player_signature: String,
    pub guardian_signature: String,
}

impl ConsentSubmission {
    /// Free-text fields in form order, keyed by their JSON names
    pub fn text_fields(&self) -> [(&'static str, &str); 25] {
        [
            ("kidFullName", self.kid_full_name.as_str()),
            ("dob", self.dob.as_str()),
            ("gender", self.gender.as_str()),
            ("address", self.address.as_str()),
            ("language", self.language.as_str()),
            ("parent1Name", self.parent1_name.as_str()),
            ("parent1Relation", self.parent1_relation.as_str()),
            ("parent1Phone", self.parent1_phone.as_str()),
            ("parent1Email", self.parent1_email.as_str()),
            ("parent2Name", self.parent2_name.as_str()),
            ("parent2Phone", self.parent2_phone.as_str()),
            ("emergencyName", self.emergency_name.as_str()),
            ("emergencyRelation", self.emergency_relation.as_str()),
            ("emergencyPhone1", self.emergency_phone1.as_str()),
            ("emergencyPhone2", self.emergency_phone2.as_str()),
            ("pickupList", self.pickup_list.as_str()),
            ("pickupName1", self.pickup_name1.as_str()),
            ("pickupNumber1", self.pickup_number1.as_str()),
            ("pickupName2", self.pickup_name2.as_str()),
            ("pickupNumber2", self.pickup_number2.as_str()),
            ("healthInfo", self.health_info.as_str()),
            ("medications", self.medications.as_str()),
            ("healthConcerns", self.health_concerns.as_str()),
            ("playerName", self.player_name.as_str()),
            ("guardianName", self.guardian_name.as_str()),
        ]
    }
}

/// Stored consent form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentForm {
    pub id: Uuid,
    #[serde(flatten)]
    pub submission: ConsentSubmission,
    pub created_at: DateTime<Utc>,
}
