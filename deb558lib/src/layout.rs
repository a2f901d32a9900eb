//! Field catalog of the DEB558 extract.
//!
//! Offsets are zero-based and inclusive on both ends, so `[86, 103]` covers
//! 18 characters. Fields shared by several shapes are declared once and
//! composed into each layout.

use std::fmt;

/// Conversion applied to a sliced field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Raw,
    Trimmed,
    /// Leading `'0'` characters removed.
    ZeroStripped,
    /// Zero-padded cents.
    Money,
    /// Whole currency units, no cents.
    Units,
    /// `DDMMYYYY`.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

const fn field(name: &'static str, start: usize, end: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, start, end, kind }
}

use FieldKind::*;

/// Trailing fields carried by every record.
pub const SEQUENCE: &[FieldSpec] = &[
    field("codigo_servico", 189, 190, Integer),
    field("codigo_compe", 191, 193, Raw),
    field("sequencial_registro", 194, 199, Integer),
];

/// Account identification shared by the three detail records.
pub const ACCOUNT: &[FieldSpec] = &[
    field("codigo_registro", 0, 0, Integer),
    field("tipo_inscricao", 1, 2, Integer),
    field("numero_inscricao", 3, 16, Raw),
    field("prefixo_agencia", 17, 20, Raw),
    field("numero_conta_cliente", 29, 39, ZeroStripped),
    field("digito_verificador_conta_cliente", 40, 40, Raw),
    field("tipo_registro", 41, 41, Integer),
];

pub const HEADER: &[FieldSpec] = &[
    field("identificacao_registro_header", 0, 0, Integer),
    field("codigo_identificador_servico", 9, 10, Integer),
    field("tipo_servico", 11, 25, Raw),
    field("codigo_convenio", 37, 45, Raw),
    field("codigo_compe_bb", 76, 78, Integer),
    field("banco_brasil", 79, 93, Raw),
    field("densidade_gravacao", 100, 104, Integer),
    field("unidade_medida", 105, 107, Raw),
    field("cnpj_disponibilizado_extrato", 109, 122, Raw),
    field("data_gravacao", 181, 188, Date),
];

pub const PREVIOUS_BALANCE: &[FieldSpec] = &[
    field("valor_bloqueado_tempo_indeterminado", 42, 58, Money),
    field("codigo_convenio", 59, 67, Raw),
    field("numero_ordem_extrato_magnetico", 68, 70, Integer),
    field("saldo_anterior", 86, 103, Money),
    field("status_conta", 104, 104, Raw),
    field("total_valores_bloqueados_4_a_9_dias", 105, 121, Money),
    field("valor_bloqueado_por_3_dias", 122, 138, Money),
    field("valor_bloqueado_por_2_dias", 139, 155, Money),
    field("valor_bloqueado_por_1_dia", 156, 172, Money),
    field("data_saldo_anterior", 181, 188, Date),
];

pub const JOURNAL_ENTRY: &[FieldSpec] = &[
    field("categoria_lancamento", 42, 44, Raw),
    field("codigo_numerico_lancamento", 45, 48, Integer),
    field("literal_codigo_numerico", 49, 73, Trimmed),
    field("numero_documento_lancado", 74, 79, Raw),
    field("valor_lancamento", 86, 103, Money),
    field("numero_lote", 110, 114, Integer),
    field("prefixo_agencia_origem_lancamento", 115, 118, Integer),
    field("codigo_compe_banco_origem", 119, 121, Raw),
    field("identificador_cpmf", 122, 122, Raw),
    field("codigo_sub_historico", 128, 134, Integer),
    field("numero_documento", 135, 149, Integer),
    field("data_balancete", 173, 180, Date),
    field("data_lancamento", 181, 188, Date),
];

pub const CURRENT_BALANCE: &[FieldSpec] = &[
    field("saldo_liquido_fundo_curto_prazo", 42, 58, Money),
    field("valor_cpmf", 59, 75, Money),
    field("saldo_atual", 86, 103, Money),
    field("status_saldo_atual", 104, 104, Raw),
    field("estagio_saldo_atual", 105, 105, Raw),
    field("saldo_liquido_fundo_commodities", 106, 122, Money),
    field("juros_capitalizados", 123, 137, Money),
    field("iof_capitalizados", 138, 152, Money),
    field("limite_cheque_ouro_sem_centavos", 153, 161, Units),
    field("saldo_liquido_fundo_curto_prazo_2", 162, 178, Money),
    field("data_saldo_atual", 181, 188, Date),
];

pub const TRAILER: &[FieldSpec] = &[
    field("identificacao_trailer", 0, 0, Integer),
    field("total_contas_que_tiveram_extratos", 1, 5, Integer),
    field("somatorio_registros_tipo_1", 6, 11, Integer),
    field("total_valores_lancados_a_debito", 12, 27, Money),
    field("total_valores_lancados_a_credito", 28, 43, Money),
];

/// The five record shapes of the extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Header,
    PreviousBalance,
    JournalEntry,
    CurrentBalance,
    Trailer,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Header,
        Shape::PreviousBalance,
        Shape::JournalEntry,
        Shape::CurrentBalance,
        Shape::Trailer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Header => "header",
            Shape::PreviousBalance => "previous_balance",
            Shape::JournalEntry => "journal_entry",
            Shape::CurrentBalance => "current_balance",
            Shape::Trailer => "trailer",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered field list of one shape, assembled from its declared parts.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    parts: &'static [&'static [FieldSpec]],
}

impl Layout {
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let parts = self.parts;
        parts.iter().flat_map(|part| part.iter())
    }

    pub(crate) fn len(&self) -> usize {
        self.parts.iter().map(|part| part.len()).sum()
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldSpec> {
        self.iter().find(|f| f.name == name)
    }
}

pub fn fields(shape: Shape) -> Layout {
    let parts: &'static [&'static [FieldSpec]] = match shape {
        Shape::Header => &[HEADER, SEQUENCE],
        Shape::PreviousBalance => &[ACCOUNT, PREVIOUS_BALANCE, SEQUENCE],
        Shape::JournalEntry => &[ACCOUNT, JOURNAL_ENTRY, SEQUENCE],
        Shape::CurrentBalance => &[ACCOUNT, CURRENT_BALANCE, SEQUENCE],
        Shape::Trailer => &[TRAILER, SEQUENCE],
    };
    Layout { parts }
}
