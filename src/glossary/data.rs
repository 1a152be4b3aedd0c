//! Built-in English → Arabic medical glossary
//!
//! Tables are kept in display order; that order is also the tie-break order the
//! substitution engine uses for terms of equal length.

use super::Category;

pub(crate) const DISEASES: &[(&str, &str)] = &[
    ("diabetes", "السكري"),
    ("hypertension", "ارتفاع ضغط الدم"),
    ("cancer", "السرطان"),
    ("heart disease", "أمراض القلب"),
    ("asthma", "الربو"),
    ("arthritis", "التهاب المفاصل"),
    ("pneumonia", "الالتهاب الرئوي"),
    ("hepatitis", "التهاب الكبد"),
    ("tuberculosis", "السل"),
    ("malaria", "الملاريا"),
    ("influenza", "الإنفلونزا"),
    ("covid-19", "كوفيد-19"),
    ("stroke", "جلطة دماغية"),
    ("heart attack", "نوبة قلبية"),
    ("kidney failure", "فشل كلوي"),
    ("liver cirrhosis", "تشمع الكبد"),
];

pub(crate) const SYMPTOMS: &[(&str, &str)] = &[
    ("fever", "حمى"),
    ("headache", "صداع"),
    ("cough", "سعال"),
    ("pain", "ألم"),
    ("nausea", "غثيان"),
    ("vomiting", "تقيؤ"),
    ("fatigue", "تعب"),
    ("dizziness", "دوار"),
    ("shortness of breath", "ضيق التنفس"),
    ("chest pain", "ألم صدر"),
    ("abdominal pain", "ألم بطني"),
    ("back pain", "ألم ظهر"),
    ("joint pain", "ألم مفاصل"),
    ("rash", "طفح جلدي"),
    ("swelling", "تورم"),
];

pub(crate) const MEDICATIONS: &[(&str, &str)] = &[
    ("aspirin", "أسبرين"),
    ("paracetamol", "باراسيتامول"),
    ("acetaminophen", "أسيتامينوفين"),
    ("ibuprofen", "إيبوبروفين"),
    ("antibiotic", "مضاد حيوي"),
    ("insulin", "أنسولين"),
    ("vaccine", "لقاح"),
    ("vitamin", "فيتامين"),
    ("antihistamine", "مضاد الهيستامين"),
    ("corticosteroid", "كورتيكوستيرويد"),
    ("antidepressant", "مضاد اكتئاب"),
    ("painkiller", "مسكن ألم"),
];

pub(crate) const ANATOMY: &[(&str, &str)] = &[
    ("heart", "قلب"),
    ("brain", "دماغ"),
    ("liver", "كبد"),
    ("kidney", "كلية"),
    ("lung", "رئة"),
    ("stomach", "معدة"),
    ("intestine", "أمعاء"),
    ("bone", "عظم"),
    ("muscle", "عضلة"),
    ("blood", "دم"),
    ("vein", "وريد"),
    ("artery", "شريان"),
    ("nerve", "عصب"),
    ("spine", "عمود فقري"),
    ("skull", "جمجمة"),
];

pub(crate) const PROCEDURES: &[(&str, &str)] = &[
    ("surgery", "جراحة"),
    ("examination", "فحص"),
    ("test", "اختبار"),
    ("scan", "مسح"),
    ("x-ray", "أشعة سينية"),
    ("blood test", "تحليل دم"),
    ("biopsy", "خزعة"),
    ("vaccination", "تطعيم"),
    ("transplant", "زراعة"),
    ("dialysis", "غسيل كلوي"),
    ("chemotherapy", "علاج كيميائي"),
    ("radiation", "علاج إشعاعي"),
];

/// Everyday clinical vocabulary
pub(crate) const GENERAL: &[(&str, &str)] = &[
    ("patient", "المريض"),
    ("doctor", "الطبيب"),
    ("nurse", "الممرض"),
    ("hospital", "المستشفى"),
    ("clinic", "العيادة"),
    ("pharmacy", "الصيدلية"),
    ("emergency", "الطوارئ"),
    ("icu", "العناية المركزة"),
    ("operation room", "غرفة العمليات"),
    ("medical record", "السجل الطبي"),
    ("prescription", "الوصفة الطبية"),
    ("dosage", "الجرعة"),
    ("side effects", "الآثار الجانبية"),
    ("allergy", "حساسية"),
    ("chronic", "مزمن"),
    ("acute", "حاد"),
    ("benign", "حميد"),
    ("malignant", "خبيث"),
];

/// Built-in table for a category
pub(crate) fn table(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Disease => DISEASES,
        Category::Symptom => SYMPTOMS,
        Category::Medication => MEDICATIONS,
        Category::Anatomy => ANATOMY,
        Category::Procedure => PROCEDURES,
        Category::General => GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(DISEASES.len(), 16);
        assert_eq!(SYMPTOMS.len(), 15);
        assert_eq!(MEDICATIONS.len(), 12);
        assert_eq!(ANATOMY.len(), 15);
        assert_eq!(PROCEDURES.len(), 12);
        assert_eq!(GENERAL.len(), 18);
    }

    #[test]
    fn test_source_terms_are_lowercase_ascii() {
        for category in Category::ALL {
            for (source, target) in table(category) {
                assert!(source.is_ascii(), "{} is not ASCII", source);
                assert_eq!(*source, source.to_lowercase());
                assert!(!target.is_empty());
            }
        }
    }
}
