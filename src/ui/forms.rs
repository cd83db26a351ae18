use crate::models::NewStudent;

/// Internal representation of the seven-field student registration form.
#[derive(Default, Clone)]
pub(crate) struct StudentForm {
    pub(crate) fields: NewStudent,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

/// Fields available within the student form, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum StudentField {
    #[default]
    Name,
    Dob,
    Gender,
    Phone,
    Email,
    FatherName,
    Address,
}

impl StudentField {
    pub(crate) const ALL: [StudentField; 7] = [
        StudentField::Name,
        StudentField::Dob,
        StudentField::Gender,
        StudentField::Phone,
        StudentField::Email,
        StudentField::FatherName,
        StudentField::Address,
    ];

    /// Prompt label shown next to the field's value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::Dob => "Date of birth (YYYY-MM-DD)",
            StudentField::Gender => "Gender",
            StudentField::Phone => "Phone",
            StudentField::Email => "Email",
            StudentField::FatherName => "Father's name",
            StudentField::Address => "Address",
        }
    }
}

impl StudentForm {
    /// Move focus to the next field, wrapping from the last back to the first.
    pub(crate) fn next_field(&mut self) {
        let idx = StudentField::ALL
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);
        self.active = StudentField::ALL[(idx + 1) % StudentField::ALL.len()];
    }

    /// Move focus to the previous field, wrapping from the first to the last.
    pub(crate) fn prev_field(&mut self) {
        let idx = StudentField::ALL
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);
        self.active =
            StudentField::ALL[(idx + StudentField::ALL.len() - 1) % StudentField::ALL.len()];
    }

    /// Whether focus sits on the last field, where Enter submits instead of
    /// advancing.
    pub(crate) fn on_last_field(&self) -> bool {
        self.active == StudentField::Address
    }

    /// Mutable access to whichever value currently has focus.
    pub(crate) fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            StudentField::Name => &mut self.fields.name,
            StudentField::Dob => &mut self.fields.dob,
            StudentField::Gender => &mut self.fields.gender,
            StudentField::Phone => &mut self.fields.phone,
            StudentField::Email => &mut self.fields.email,
            StudentField::FatherName => &mut self.fields.father_name,
            StudentField::Address => &mut self.fields.address,
        }
    }

    /// Read-only value for a given field, used while rendering.
    pub(crate) fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.fields.name,
            StudentField::Dob => &self.fields.dob,
            StudentField::Gender => &self.fields.gender,
            StudentField::Phone => &self.fields.phone,
            StudentField::Email => &self.fields.email,
            StudentField::FatherName => &self.fields.father_name,
            StudentField::Address => &self.fields.address,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.error = None;
        self.active_value_mut().push(ch);
    }

    pub(crate) fn pop_char(&mut self) {
        self.active_value_mut().pop();
    }

    /// Hand back the collected values. The only check is that a name was
    /// typed at all; every other field is stored exactly as entered.
    pub(crate) fn submit(&mut self) -> Option<NewStudent> {
        if self.fields.name.trim().is_empty() {
            self.error = Some("Name must not be empty".to_string());
            return None;
        }
        Some(self.fields.clone())
    }
}

/// Single-field form for adding a catalog course.
#[derive(Default, Clone)]
pub(crate) struct CourseForm {
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl CourseForm {
    pub(crate) fn push_char(&mut self, ch: char) {
        self.error = None;
        self.name.push(ch);
    }

    pub(crate) fn pop_char(&mut self) {
        self.name.pop();
    }

    pub(crate) fn submit(&mut self) -> Option<String> {
        if self.name.trim().is_empty() {
            self.error = Some("Course name must not be empty".to_string());
            return None;
        }
        Some(self.name.clone())
    }
}

/// Numeric identifier input used by the two-step enrollment flow. The core
/// never sees malformed values: parsing happens here, and a parse failure
/// keeps focus on the input with an inline error.
#[derive(Default, Clone)]
pub(crate) struct IdInput {
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl IdInput {
    /// Accept digits only so the buffer always parses once non-empty.
    pub(crate) fn push_char(&mut self, ch: char) {
        if ch.is_ascii_digit() {
            self.error = None;
            self.value.push(ch);
        }
    }

    pub(crate) fn pop_char(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse(&mut self) -> Option<i64> {
        match self.value.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                self.error = Some("Enter a numeric id".to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_form_cycles_through_all_fields() {
        let mut form = StudentForm::default();
        assert_eq!(form.active, StudentField::Name);
        for expected in StudentField::ALL.iter().skip(1) {
            form.next_field();
            assert_eq!(form.active, *expected);
        }
        form.next_field();
        assert_eq!(form.active, StudentField::Name);
        form.prev_field();
        assert_eq!(form.active, StudentField::Address);
        assert!(form.on_last_field());
    }

    #[test]
    fn student_form_edits_the_focused_field() {
        let mut form = StudentForm::default();
        form.push_char('A');
        form.push_char('d');
        form.push_char('a');
        form.next_field();
        form.push_char('1');
        form.pop_char();
        assert_eq!(form.fields.name, "Ada");
        assert_eq!(form.fields.dob, "");
    }

    #[test]
    fn student_form_requires_a_name() {
        let mut form = StudentForm::default();
        assert!(form.submit().is_none());
        assert!(form.error.is_some());
        form.push_char('A');
        let fields = form.submit().expect("name present");
        assert_eq!(fields.name, "A");
    }

    #[test]
    fn id_input_rejects_non_digits_and_parses() {
        let mut input = IdInput::default();
        input.push_char('x');
        assert_eq!(input.value, "");
        assert!(input.parse().is_none());
        assert!(input.error.is_some());
        input.push_char('4');
        input.push_char('2');
        assert_eq!(input.parse(), Some(42));
    }
}
