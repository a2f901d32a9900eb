//! Decoded records. `Fields` is the generic name → value view produced by the
//! decoder; the typed records below are built from it.

use crate::{
    error::{Deb558Error, Result},
    layout::Shape,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
    Amount(Decimal),
    /// `None` when the source held no valid `DDMMYYYY` date.
    Date(Option<NaiveDate>),
}

/// Field values of one block in layout order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fields(Vec<(&'static str, Value)>);

impl Fields {
    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    pub(crate) fn push(&mut self, name: &'static str, value: Value) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn integer(&self, field: &'static str) -> Result<i64> {
        match self.get(field) {
            Some(Value::Integer(v)) => Ok(*v),
            _ => Err(Deb558Error::FieldMismatch { field }),
        }
    }

    pub fn text(&self, field: &'static str) -> Result<String> {
        match self.get(field) {
            Some(Value::Text(v)) => Ok(v.clone()),
            _ => Err(Deb558Error::FieldMismatch { field }),
        }
    }

    pub fn amount(&self, field: &'static str) -> Result<Decimal> {
        match self.get(field) {
            Some(Value::Amount(v)) => Ok(*v),
            _ => Err(Deb558Error::FieldMismatch { field }),
        }
    }

    pub fn date(&self, field: &'static str) -> Result<Option<NaiveDate>> {
        match self.get(field) {
            Some(Value::Date(v)) => Ok(*v),
            _ => Err(Deb558Error::FieldMismatch { field }),
        }
    }
}

/// Service code, COMPE code and sequence number closing every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub codigo_servico: i64,
    pub codigo_compe: String,
    pub sequencial_registro: i64,
}

impl Sequence {
    fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            codigo_servico: f.integer("codigo_servico")?,
            codigo_compe: f.text("codigo_compe")?,
            sequencial_registro: f.integer("sequencial_registro")?,
        })
    }
}

/// Account identification opening every detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub codigo_registro: i64,
    pub tipo_inscricao: i64,
    pub numero_inscricao: String,
    pub prefixo_agencia: String,
    pub numero_conta_cliente: String,
    pub digito_verificador_conta_cliente: String,
    pub tipo_registro: i64,
}

impl Account {
    fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            codigo_registro: f.integer("codigo_registro")?,
            tipo_inscricao: f.integer("tipo_inscricao")?,
            numero_inscricao: f.text("numero_inscricao")?,
            prefixo_agencia: f.text("prefixo_agencia")?,
            numero_conta_cliente: f.text("numero_conta_cliente")?,
            digito_verificador_conta_cliente: f.text("digito_verificador_conta_cliente")?,
            tipo_registro: f.integer("tipo_registro")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub identificacao_registro_header: i64,
    pub codigo_identificador_servico: i64,
    pub tipo_servico: String,
    pub codigo_convenio: String,
    pub codigo_compe_bb: i64,
    pub banco_brasil: String,
    pub densidade_gravacao: i64,
    pub unidade_medida: String,
    pub cnpj_disponibilizado_extrato: String,
    pub data_gravacao: Option<NaiveDate>,
    #[serde(flatten)]
    pub sequence: Sequence,
}

impl Header {
    pub fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            identificacao_registro_header: f.integer("identificacao_registro_header")?,
            codigo_identificador_servico: f.integer("codigo_identificador_servico")?,
            tipo_servico: f.text("tipo_servico")?,
            codigo_convenio: f.text("codigo_convenio")?,
            codigo_compe_bb: f.integer("codigo_compe_bb")?,
            banco_brasil: f.text("banco_brasil")?,
            densidade_gravacao: f.integer("densidade_gravacao")?,
            unidade_medida: f.text("unidade_medida")?,
            cnpj_disponibilizado_extrato: f.text("cnpj_disponibilizado_extrato")?,
            data_gravacao: f.date("data_gravacao")?,
            sequence: Sequence::from_fields(f)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviousBalance {
    #[serde(flatten)]
    pub account: Account,
    pub valor_bloqueado_tempo_indeterminado: Decimal,
    pub codigo_convenio: String,
    pub numero_ordem_extrato_magnetico: i64,
    pub saldo_anterior: Decimal,
    pub status_conta: String,
    pub total_valores_bloqueados_4_a_9_dias: Decimal,
    pub valor_bloqueado_por_3_dias: Decimal,
    pub valor_bloqueado_por_2_dias: Decimal,
    pub valor_bloqueado_por_1_dia: Decimal,
    pub data_saldo_anterior: Option<NaiveDate>,
    #[serde(flatten)]
    pub sequence: Sequence,
}

impl PreviousBalance {
    pub fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            account: Account::from_fields(f)?,
            valor_bloqueado_tempo_indeterminado: f.amount("valor_bloqueado_tempo_indeterminado")?,
            codigo_convenio: f.text("codigo_convenio")?,
            numero_ordem_extrato_magnetico: f.integer("numero_ordem_extrato_magnetico")?,
            saldo_anterior: f.amount("saldo_anterior")?,
            status_conta: f.text("status_conta")?,
            total_valores_bloqueados_4_a_9_dias: f.amount("total_valores_bloqueados_4_a_9_dias")?,
            valor_bloqueado_por_3_dias: f.amount("valor_bloqueado_por_3_dias")?,
            valor_bloqueado_por_2_dias: f.amount("valor_bloqueado_por_2_dias")?,
            valor_bloqueado_por_1_dia: f.amount("valor_bloqueado_por_1_dia")?,
            data_saldo_anterior: f.date("data_saldo_anterior")?,
            sequence: Sequence::from_fields(f)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    #[serde(flatten)]
    pub account: Account,
    pub categoria_lancamento: String,
    pub codigo_numerico_lancamento: i64,
    pub literal_codigo_numerico: String,
    pub numero_documento_lancado: String,
    pub valor_lancamento: Decimal,
    pub numero_lote: i64,
    pub prefixo_agencia_origem_lancamento: i64,
    pub codigo_compe_banco_origem: String,
    pub identificador_cpmf: String,
    pub codigo_sub_historico: i64,
    pub numero_documento: i64,
    pub data_balancete: Option<NaiveDate>,
    pub data_lancamento: Option<NaiveDate>,
    #[serde(flatten)]
    pub sequence: Sequence,
}

impl JournalEntry {
    pub fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            account: Account::from_fields(f)?,
            categoria_lancamento: f.text("categoria_lancamento")?,
            codigo_numerico_lancamento: f.integer("codigo_numerico_lancamento")?,
            literal_codigo_numerico: f.text("literal_codigo_numerico")?,
            numero_documento_lancado: f.text("numero_documento_lancado")?,
            valor_lancamento: f.amount("valor_lancamento")?,
            numero_lote: f.integer("numero_lote")?,
            prefixo_agencia_origem_lancamento: f.integer("prefixo_agencia_origem_lancamento")?,
            codigo_compe_banco_origem: f.text("codigo_compe_banco_origem")?,
            identificador_cpmf: f.text("identificador_cpmf")?,
            codigo_sub_historico: f.integer("codigo_sub_historico")?,
            numero_documento: f.integer("numero_documento")?,
            data_balancete: f.date("data_balancete")?,
            data_lancamento: f.date("data_lancamento")?,
            sequence: Sequence::from_fields(f)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentBalance {
    #[serde(flatten)]
    pub account: Account,
    pub saldo_liquido_fundo_curto_prazo: Decimal,
    pub valor_cpmf: Decimal,
    pub saldo_atual: Decimal,
    pub status_saldo_atual: String,
    pub estagio_saldo_atual: String,
    pub saldo_liquido_fundo_commodities: Decimal,
    pub juros_capitalizados: Decimal,
    pub iof_capitalizados: Decimal,
    pub limite_cheque_ouro_sem_centavos: Decimal,
    pub saldo_liquido_fundo_curto_prazo_2: Decimal,
    pub data_saldo_atual: Option<NaiveDate>,
    #[serde(flatten)]
    pub sequence: Sequence,
}

impl CurrentBalance {
    pub fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            account: Account::from_fields(f)?,
            saldo_liquido_fundo_curto_prazo: f.amount("saldo_liquido_fundo_curto_prazo")?,
            valor_cpmf: f.amount("valor_cpmf")?,
            saldo_atual: f.amount("saldo_atual")?,
            status_saldo_atual: f.text("status_saldo_atual")?,
            estagio_saldo_atual: f.text("estagio_saldo_atual")?,
            saldo_liquido_fundo_commodities: f.amount("saldo_liquido_fundo_commodities")?,
            juros_capitalizados: f.amount("juros_capitalizados")?,
            iof_capitalizados: f.amount("iof_capitalizados")?,
            limite_cheque_ouro_sem_centavos: f.amount("limite_cheque_ouro_sem_centavos")?,
            saldo_liquido_fundo_curto_prazo_2: f.amount("saldo_liquido_fundo_curto_prazo_2")?,
            data_saldo_atual: f.date("data_saldo_atual")?,
            sequence: Sequence::from_fields(f)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trailer {
    pub identificacao_trailer: i64,
    pub total_contas_que_tiveram_extratos: i64,
    pub somatorio_registros_tipo_1: i64,
    pub total_valores_lancados_a_debito: Decimal,
    pub total_valores_lancados_a_credito: Decimal,
    #[serde(flatten)]
    pub sequence: Sequence,
}

impl Trailer {
    pub fn from_fields(f: &Fields) -> Result<Self> {
        Ok(Self {
            identificacao_trailer: f.integer("identificacao_trailer")?,
            total_contas_que_tiveram_extratos: f.integer("total_contas_que_tiveram_extratos")?,
            somatorio_registros_tipo_1: f.integer("somatorio_registros_tipo_1")?,
            total_valores_lancados_a_debito: f.amount("total_valores_lancados_a_debito")?,
            total_valores_lancados_a_credito: f.amount("total_valores_lancados_a_credito")?,
            sequence: Sequence::from_fields(f)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "registro", rename_all = "snake_case")]
pub enum Record {
    Header(Header),
    PreviousBalance(PreviousBalance),
    JournalEntry(JournalEntry),
    CurrentBalance(CurrentBalance),
    Trailer(Trailer),
}

impl Record {
    /// Builds the typed record for `shape` out of its decoded fields.
    pub fn from_fields(shape: Shape, f: &Fields) -> Result<Self> {
        Ok(match shape {
            Shape::Header => Record::Header(Header::from_fields(f)?),
            Shape::PreviousBalance => Record::PreviousBalance(PreviousBalance::from_fields(f)?),
            Shape::JournalEntry => Record::JournalEntry(JournalEntry::from_fields(f)?),
            Shape::CurrentBalance => Record::CurrentBalance(CurrentBalance::from_fields(f)?),
            Shape::Trailer => Record::Trailer(Trailer::from_fields(f)?),
        })
    }

    pub fn shape(&self) -> Shape {
        match self {
            Record::Header(_) => Shape::Header,
            Record::PreviousBalance(_) => Shape::PreviousBalance,
            Record::JournalEntry(_) => Shape::JournalEntry,
            Record::CurrentBalance(_) => Shape::CurrentBalance,
            Record::Trailer(_) => Shape::Trailer,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        match self {
            Record::Header(r) => &r.sequence,
            Record::PreviousBalance(r) => &r.sequence,
            Record::JournalEntry(r) => &r.sequence,
            Record::CurrentBalance(r) => &r.sequence,
            Record::Trailer(r) => &r.sequence,
        }
    }

    /// Account block of detail records; `None` for header and trailer.
    pub fn account(&self) -> Option<&Account> {
        match self {
            Record::PreviousBalance(r) => Some(&r.account),
            Record::JournalEntry(r) => Some(&r.account),
            Record::CurrentBalance(r) => Some(&r.account),
            Record::Header(_) | Record::Trailer(_) => None,
        }
    }
}
